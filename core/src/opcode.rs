/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each. Their behavior is cased on some
/// combination of:
/// - `(f, _, _, _)` broad categorization; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within a category
/// - `(_, _, n, n)` more specific behavior within a category
/// - `(_, n, n, n)` some fixed function that doesn't require variables (e.g. CLS)
///
/// Nibbles not used to select the operation often (but not always) carry data:
/// - `(_, n, n, n)` a 12-bit address
/// - `(_, _, n, n)` a byte that is assigned to and/or compared with Vx
/// - `(_, n, _, _)` the register Vx or a range of registers V0..Vx
/// - `(_, _, n, _)` the register Vy
///
/// Decoding is total: every field is extracted for every word, and unused
/// fields are simply ignored by the executing routine. Whether the
/// family/modifier combination names a real instruction is decided at
/// dispatch time, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    /// The raw instruction word.
    pub word: u16,
    /// The most significant nibble, selecting the primary dispatch branch.
    pub family: u8,
    /// The low 12 bits.
    /// `[_adr]`
    pub addr: u16,
    /// The low byte.
    /// `[__kk]`
    pub kk: u8,
    /// The low nibble.
    /// `[___n]`
    pub n: u8,
    /// The second nibble.
    /// `[_x__]`
    pub x: u8,
    /// The third nibble.
    /// `[__y_]`
    pub y: u8,
}

impl Opcode {
    pub fn decode(word: u16) -> Self {
        Opcode {
            word,
            family: ((word & 0xF000) >> 12) as u8,
            addr: word & 0x0FFF,
            kk: (word & 0x00FF) as u8,
            n: (word & 0x000F) as u8,
            x: ((word & 0x0F00) >> 8) as u8,
            y: ((word & 0x00F0) >> 4) as u8,
        }
    }

    /// The opcode's component nibbles, most significant first.
    pub fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.family, self.x, self.y, self.n)
    }
}
