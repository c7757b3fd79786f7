use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{FRAME_BUFFER_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET, STACK_DEPTH};
use crate::disasm::disassemble;
use crate::error::Error;
use crate::instruction;
use crate::opcode::Opcode;

/// The framebuffer is a flat row-major array of 0/1 cells, indexed as
/// `row * DISPLAY_WIDTH + col`.
pub type FrameBuffer = [u8; FRAME_BUFFER_SIZE];

/// # Machine
///
/// A Chip-8 virtual machine: 4K of memory, sixteen 8-bit registers, a 12-bit
/// index register, a sixteen-deep call stack, two 60 Hz countdown timers, a
/// 64x32 monochrome framebuffer, and a sixteen-key keypad.
///
/// The machine is single-threaded and synchronous. An external driver owns
/// the clocks: it calls [`step`](Machine::step) at the CPU rate and
/// [`tick_timers`](Machine::tick_timers) at 60 Hz, supplies the key state,
/// and consumes frames via [`take_frame`](Machine::take_frame).
///
/// `VF` is an ordinary slot of `v` rather than a separate field so that
/// instructions whose destination register *is* `VF` reproduce the hardware
/// aliasing: the flag is written first and the destination result overwrites
/// it.
pub struct Machine {
    pub(crate) memory: [u8; MEMORY_SIZE],
    pub(crate) v: [u8; 16],
    pub(crate) i: u16,
    pub(crate) pc: u16,
    pub(crate) stack: [u16; STACK_DEPTH],
    /// Number of return addresses currently on the stack, 0..=16.
    pub(crate) sp: u8,
    pub(crate) delay_timer: u8,
    pub(crate) sound_timer: u8,
    pub(crate) frame_buffer: FrameBuffer,
    pub(crate) redraw: bool,
    pub(crate) keys: [bool; 16],
    pub(crate) rng: StdRng,
    pub(crate) last_undefined: Option<u16>,
}

impl Machine {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A machine whose random-number instruction produces a reproducible
    /// sequence. The exact sequence is not part of the compatibility surface.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        // 0x000-0x04F holds the built-in hexadecimal glyph table.
        let mut memory = [0; MEMORY_SIZE];
        memory[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        Machine {
            memory,
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START as u16,
            stack: [0; STACK_DEPTH],
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            frame_buffer: [0; FRAME_BUFFER_SIZE],
            redraw: false,
            keys: [false; 16],
            rng,
            last_undefined: None,
        }
    }

    /// Place a program image at 0x200.
    ///
    /// At most `4096 - 0x200` bytes fit; any excess is dropped with a
    /// warning. Returns the number of bytes actually placed.
    pub fn load(&mut self, image: &[u8]) -> usize {
        let capacity = MEMORY_SIZE - PROGRAM_START;
        let len = image.len().min(capacity);
        if len < image.len() {
            log::warn!(
                "program image is {} bytes but only {} fit; truncating",
                image.len(),
                capacity
            );
        }
        self.memory[PROGRAM_START..PROGRAM_START + len].copy_from_slice(&image[..len]);
        len
    }

    /// Set the pressed state of a single key, 0x0-0xF.
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        self.keys[key as usize] = pressed;
    }

    /// Replace the whole key-state vector.
    pub fn set_keys(&mut self, keys: [bool; 16]) {
        self.keys = keys;
    }

    /// Returns the framebuffer and clears the redraw flag if a redraw is
    /// pending, otherwise `None`.
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.redraw {
            self.redraw = false;
            Some(self.frame_buffer)
        } else {
            None
        }
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw
    }

    /// Current sound timer value; nonzero means the tone is playing.
    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    /// The most recent unrecognized instruction word, if any.
    pub fn last_undefined(&self) -> Option<u16> {
        self.last_undefined
    }

    /// Disassemble the instruction the next `step` would execute, as
    /// `(pc, raw word, mnemonic)`. Pure read; `None` if the fetch would be
    /// out of bounds.
    pub fn peek(&self) -> Option<(u16, u16, String)> {
        if self.pc as usize + 1 >= MEMORY_SIZE {
            return None;
        }
        let word = self.fetch_at(self.pc);
        Some((self.pc, word, disassemble(Opcode::decode(word))))
    }

    /// Fetch, decode, and execute exactly one instruction.
    ///
    /// Every routine advances the program counter itself: straight-line
    /// instructions add 2, control flow sets it directly, and the no-key case
    /// of `Fx0A` leaves it alone so the instruction re-executes on the next
    /// call.
    pub fn step(&mut self) -> Result<(), Error> {
        if self.pc as usize + 1 >= MEMORY_SIZE {
            return Err(Error::FetchOutOfBounds { addr: self.pc });
        }
        let word = self.fetch_at(self.pc);
        let op = Opcode::decode(word);
        log::trace!("{:04X}: {:04X} {}", self.pc, word, disassemble(op));
        instruction::from_op(op)(self, op)
    }

    /// Decrement both timers independently toward 0.
    ///
    /// Returns `true` exactly when the sound timer transitions from 1 to 0
    /// within this call; the driver renders that as the end of the tone.
    /// Intended to be called at 60 Hz regardless of the CPU clock rate.
    pub fn tick_timers(&mut self) -> bool {
        if self.delay_timer > 0 {
            self.delay_timer -= 1;
        }
        if self.sound_timer > 0 {
            self.sound_timer -= 1;
            return self.sound_timer == 0;
        }
        false
    }

    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two
    /// subsequent bytes. Caller is responsible for the bounds check.
    fn fetch_at(&self, addr: u16) -> u16 {
        let left = u16::from(self.memory[addr as usize]);
        let right = u16::from(self.memory[addr as usize + 1]);
        left << 8 | right
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combines_bytes_into_words() {
        let mut machine = Machine::with_seed(0);
        machine.memory[0x200..0x202].copy_from_slice(&[0xAA, 0xBB]);
        assert_eq!(machine.fetch_at(0x200), 0xAABB);
    }

    #[test]
    fn test_loads_sprite_sheet_at_construction() {
        let machine = Machine::with_seed(0);
        assert_eq!(machine.memory[..80], SPRITE_SHEET);
        assert_eq!(machine.pc, PROGRAM_START as u16);
    }

    #[test]
    fn test_load_places_image_at_program_start() {
        let mut machine = Machine::with_seed(0);
        let loaded = machine.load(&[0x12, 0x34]);
        assert_eq!(loaded, 2);
        assert_eq!(machine.memory[0x200..0x202], [0x12, 0x34]);
    }

    #[test]
    fn test_load_truncates_oversized_images() {
        let mut machine = Machine::with_seed(0);
        let image = vec![0xFF; 5000];
        let loaded = machine.load(&image);
        assert_eq!(loaded, MEMORY_SIZE - PROGRAM_START);
        assert_eq!(machine.memory[MEMORY_SIZE - 1], 0xFF);
    }

    #[test]
    fn test_fetch_past_end_of_memory_is_fatal() {
        let mut machine = Machine::with_seed(0);
        machine.pc = 0xFFF;
        assert_eq!(machine.step(), Err(Error::FetchOutOfBounds { addr: 0xFFF }));
    }

    #[test]
    fn test_undefined_opcode_is_recovered() {
        let mut machine = Machine::with_seed(0);
        machine.memory[0x200..0x202].copy_from_slice(&[0x0A, 0xBC]);
        machine.step().unwrap();
        assert_eq!(machine.pc, 0x202);
        assert_eq!(machine.last_undefined(), Some(0x0ABC));
    }

    #[test]
    fn test_timers_floor_at_zero() {
        let mut machine = Machine::with_seed(0);
        machine.tick_timers();
        assert_eq!(machine.delay_timer, 0);
        assert_eq!(machine.sound_timer, 0);
    }

    #[test]
    fn test_timers_decrement_independently() {
        let mut machine = Machine::with_seed(0);
        machine.delay_timer = 3;
        machine.sound_timer = 1;
        machine.tick_timers();
        assert_eq!(machine.delay_timer, 2);
        assert_eq!(machine.sound_timer, 0);
    }

    #[test]
    fn test_tone_end_fires_exactly_once() {
        let mut machine = Machine::with_seed(0);
        machine.sound_timer = 2;
        assert!(!machine.tick_timers());
        assert!(machine.tick_timers());
        assert!(!machine.tick_timers());
    }

    #[test]
    fn test_take_frame_clears_redraw() {
        let mut machine = Machine::with_seed(0);
        assert!(machine.take_frame().is_none());
        machine.redraw = true;
        assert!(machine.take_frame().is_some());
        assert!(!machine.redraw_pending());
    }

    #[test]
    fn test_peek_is_a_pure_read() {
        let mut machine = Machine::with_seed(0);
        machine.memory[0x200..0x202].copy_from_slice(&[0x00, 0xE0]);
        let (pc, word, text) = machine.peek().unwrap();
        assert_eq!((pc, word, text.as_str()), (0x200, 0x00E0, "CLS"));
        assert_eq!(machine.pc, 0x200);
        machine.pc = 0xFFF;
        assert!(machine.peek().is_none());
    }
}
