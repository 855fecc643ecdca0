/// Input device class a host query is addressed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Device {
    Joypad,
    Keyboard,
    Mouse,
}

/// RetroPad button ids, as passed to `query(port, Device::Joypad, 0, id)`.
pub mod joypad {
    pub const B: u32 = 0;
    pub const Y: u32 = 1;
    pub const SELECT: u32 = 2;
    pub const START: u32 = 3;
    pub const UP: u32 = 4;
    pub const DOWN: u32 = 5;
    pub const LEFT: u32 = 6;
    pub const RIGHT: u32 = 7;
    pub const A: u32 = 8;
    pub const X: u32 = 9;
    pub const L: u32 = 10;
    pub const R: u32 = 11;
    pub const L2: u32 = 12;
    pub const R2: u32 = 13;
    pub const L3: u32 = 14;
    pub const R3: u32 = 15;

    /// Number of button ids a joypad reports.
    pub const COUNT: usize = 16;
}

/// Mouse ids, as passed to `query(port, Device::Mouse, 0, id)`.
///
/// `X` and `Y` report signed relative motion since the previous poll;
/// the button ids report 0 or 1.
pub mod mouse {
    pub const X: u32 = 0;
    pub const Y: u32 = 1;
    pub const LEFT: u32 = 2;
    pub const RIGHT: u32 = 3;
    pub const MIDDLE: u32 = 6;
}

/// The host's per-frame input poll boundary.
///
/// `poll()` freshens the queryable state once per emulated frame; every
/// `query()` afterwards reads that frame's levels. Keyboard queries use the
/// host key code as `id` and ignore `port`.
pub trait PollSource {
    fn poll(&mut self);

    /// Level of one input: 0/1 for buttons and keys, signed motion for
    /// mouse axes.
    fn query(&self, port: usize, device: Device, index: u32, id: u32) -> i16;

    /// Convenience for boolean inputs on index 0.
    fn pressed(&self, port: usize, device: Device, id: u32) -> bool {
        self.query(port, device, 0, id) != 0
    }
}
