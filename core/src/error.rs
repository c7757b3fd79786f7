use thiserror::Error;

/// Fatal execution conditions.
///
/// All of these indicate a malformed or malicious program image. Execution
/// stops rather than wrapping or silently corrupting unrelated state; the
/// driver decides whether to reset the machine or give up.
///
/// Unknown instruction words are deliberately *not* errors; they are treated
/// as no-ops that still advance the program counter (see
/// `operations::undefined`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Instruction fetch would read past the end of memory.
    #[error("instruction fetch out of bounds at {addr:#05X}")]
    FetchOutOfBounds { addr: u16 },

    /// An instruction addressed a memory cell past the end of memory.
    #[error("memory access out of bounds at {addr:#05X}")]
    MemoryOutOfBounds { addr: usize },

    /// Return with no call frame on the stack.
    #[error("stack underflow on return at {pc:#05X}")]
    StackUnderflow { pc: u16 },

    /// Call with all sixteen stack slots already in use.
    #[error("stack overflow on call at {pc:#05X}")]
    StackOverflow { pc: u16 },
}
