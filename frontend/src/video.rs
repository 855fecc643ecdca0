use log::{info, warn};
use retroport_core::video::Geometry;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};

pub struct Video {
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    width: u32,
    height: u32,
}

/// Window size for a declared geometry: the display height times the
/// scale, with the width following the geometry's aspect ratio.
pub fn window_size(geometry: &Geometry, scale: u32) -> (u32, u32) {
    let width = (geometry.height as f32 * geometry.aspect_ratio).round() as u32;
    (width * scale, geometry.height * scale)
}

impl Video {
    /// Create an SDL window sized for `geometry`, rendering a framebuffer of
    /// the machine's native resolution.
    pub fn new(
        sdl_video: &sdl2::VideoSubsystem,
        title: &str,
        native_width: u32,
        native_height: u32,
        geometry: &Geometry,
        scale: u32,
    ) -> Self {
        let (window_width, window_height) = window_size(geometry, scale);
        let window = sdl_video
            .window(title, window_width, window_height)
            .position_centered()
            .build()
            .expect("Failed to create window");

        let canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .expect("Failed to create canvas");

        let texture_creator = canvas.texture_creator();

        Self {
            canvas,
            texture_creator,
            width: native_width,
            height: native_height,
        }
    }

    /// Follow a geometry change from the negotiator.
    pub fn resize(&mut self, geometry: &Geometry, scale: u32) {
        let (width, height) = window_size(geometry, scale);
        let window = self.canvas.window_mut();
        if window.size() == (width, height) {
            return;
        }
        match window.set_size(width, height) {
            Ok(()) => info!(
                "window resized to {width}x{height} for {}x{} at {:.4} Hz",
                geometry.width, geometry.height, geometry.frame_rate
            ),
            Err(e) => warn!("cannot resize window to {width}x{height}: {e}"),
        }
    }

    /// Upload an RGB24 framebuffer to the texture and present it.
    pub fn present(&mut self, framebuffer: &[u8]) {
        let mut texture = self
            .texture_creator
            .create_texture_streaming(PixelFormatEnum::RGB24, self.width, self.height)
            .expect("Failed to create texture");

        texture
            .update(None, framebuffer, (self.width * 3) as usize)
            .expect("Failed to update texture");

        self.canvas.clear();
        self.canvas
            .copy(&texture, None, None)
            .expect("Failed to copy texture");
        self.canvas.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retroport_core::video::{StandardBits, VideoStandard};

    #[test]
    fn pal_window_keeps_square_pixels() {
        let geometry = Geometry::for_bits(StandardBits::PAL_HIRES).unwrap();
        assert_eq!(window_size(&geometry, 1), (720, 568));
        assert_eq!(window_size(&geometry, 2), (1440, 1136));
    }

    #[test]
    fn ntsc_window_is_aspect_corrected() {
        let geometry = Geometry::for_bits(StandardBits::NTSC_HIRES).unwrap();
        assert_eq!(window_size(&geometry, 1), (609, 480));
    }

    #[test]
    fn fallback_window() {
        let geometry = Geometry::fallback(VideoStandard::Pal);
        assert_eq!(window_size(&geometry, 3), (2160, 1704));
    }
}
