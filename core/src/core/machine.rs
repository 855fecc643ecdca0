use super::sink::InputSink;

/// Refresh-rate change measured by the emulated machine itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingReport {
    /// Whether the machine's chipset now labels the signal NTSC.
    pub is_ntsc: bool,
    /// Measured vertical refresh in Hz.
    pub hz: f64,
}

/// Machine-agnostic interface for the emulation core driven by a session.
///
/// The machine receives translated input through its [`InputSink`] half.
/// The session delivers all of a frame's events before calling
/// `run_frame()`, so the machine always sees the accumulated input.
pub trait Machine: InputSink {
    /// Native framebuffer resolution as (width, height) in pixels.
    fn display_size(&self) -> (u32, u32);

    /// Run one frame of emulation.
    fn run_frame(&mut self);

    /// Render the current video state into an RGB24 pixel buffer.
    ///
    /// The buffer must be at least `width * height * 3` bytes (from `display_size()`).
    /// Pixels are stored left-to-right, top-to-bottom, 3 bytes per pixel (R, G, B).
    fn render_frame(&self, buffer: &mut [u8]);

    /// Force a full redraw on the next rendered frame.
    fn invalidate_display(&mut self);

    /// Return a refresh-rate change measured since the last call, if any.
    fn take_timing_report(&mut self) -> Option<TimingReport>;

    /// Reset the machine to its initial power-on state.
    fn reset(&mut self);
}
