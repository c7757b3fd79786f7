use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_core::FrameBuffer;

const SCALE: usize = 10;

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels, delivered by
/// the machine as a flat row-major array of 0/1 cells. `render` is only
/// called when the machine reports a pending redraw.
///
/// SDL errors are surfaced as the `String`s sdl2 produces; the driver wraps
/// them at its boundary.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Creates a new scaled window bound to an sdl2 context.
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "chip8",
                (DISPLAY_WIDTH * SCALE) as u32,
                (DISPLAY_HEIGHT * SCALE) as u32,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

        Ok(Display { canvas })
    }

    /// Expands a framebuffer into an RGB24 texture byte sequence.
    ///
    /// Each 0/1 cell becomes an identical R, G, B triple at full intensity,
    /// giving a black and white image.
    fn frame_to_texture_bytes(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|cell| std::iter::repeat(cell).take(3))
            .map(|cell| cell * 255)
            .collect()
    }

    /// Uploads the framebuffer as an RGB24 texture and presents it scaled to
    /// the window.
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;
        texture
            .update(None, &Self::frame_to_texture_bytes(frame), DISPLAY_WIDTH * 3)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
