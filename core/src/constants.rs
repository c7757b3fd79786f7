/// Total addressable memory in bytes.
pub const MEMORY_SIZE: usize = 4096;

/// Address at which program images are loaded and execution begins.
pub const PROGRAM_START: usize = 0x200;

/// Maximum number of return addresses the call stack can hold.
pub const STACK_DEPTH: usize = 16;

/// Framebuffer dimensions in pixels.
pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Number of cells in the flat, row-major framebuffer.
pub const FRAME_BUFFER_SIZE: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;

/// Default CPU clock rate in Hz; real interpreters ran anywhere in 500-1000.
pub const CPU_HZ: u32 = 500;

/// Rate at which the delay and sound timers are decremented, independent of
/// the CPU clock.
pub const TIMER_HZ: u32 = 60;

/// Height in bytes of each built-in hexadecimal glyph.
pub const GLYPH_HEIGHT: usize = 5;

/// Built-in 4x5 sprites for the hexadecimal digits 0-F, written to memory
/// 0x000-0x04F at machine construction. Each glyph is 5 bytes; only the high
/// nibble of each byte carries pixels.
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
