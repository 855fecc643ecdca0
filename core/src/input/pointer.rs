//! Pointer-to-controller overlay.
//!
//! The primary pointer drives virtual port 0: its buttons are forwarded as
//! pointer buttons, its motion as relative pointer motion, and the motion's
//! sign also drives the port's digital joystick axes. Those axes share the
//! port's [`DirectionLatch`] with the joypad resolver, so a held joystick
//! direction is re-asserted on the frame after the pointer moves it.

use super::InputMode;
use super::latch::{AxisLatch, ButtonLatch, DirectionLatch, LatchTable};
use crate::core::host::{Device, PollSource, joypad, mouse};
use crate::core::sink::{Axis, InputSink};

/// Number of virtual pointer ports.
pub const POINTER_PORTS: usize = 2;

/// Virtual port the primary pointer is applied to.
pub const PRIMARY_PORT: usize = 0;

/// Virtual pointer button slots.
pub mod slot {
    pub const LEFT: u8 = 0;
    pub const RIGHT: u8 = 1;
    pub const MIDDLE: u8 = 2;
}

/// Pointer buttons, the virtual slot each drives, and the RetroPad button
/// whose latch entry records it.
const BUTTONS: [(u32, u8, u32); 3] = [
    (mouse::LEFT, slot::LEFT, joypad::B),
    (mouse::RIGHT, slot::RIGHT, joypad::A),
    (mouse::MIDDLE, slot::MIDDLE, joypad::Y),
];

/// One frame of pointer levels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct PointerSample {
    dx: i16,
    dy: i16,
    buttons: [bool; 3],
}

impl PointerSample {
    fn read<P: PollSource + ?Sized>(source: &P) -> Self {
        let query = |id| source.query(PRIMARY_PORT, Device::Mouse, 0, id);
        Self {
            dx: query(mouse::X),
            dy: query(mouse::Y),
            buttons: BUTTONS.map(|(id, _, _)| query(id) != 0),
        }
    }
}

/// Per-port pointer latch: button flags, stored under their RetroPad
/// aliases, and the last nonzero motion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MouseLatch {
    buttons: ButtonLatch,
    last_motion: Option<(i16, i16)>,
}

impl MouseLatch {
    pub fn left(&self) -> bool {
        self.buttons.is_down(joypad::B)
    }

    pub fn right(&self) -> bool {
        self.buttons.is_down(joypad::A)
    }

    pub fn middle(&self) -> bool {
        self.buttons.is_down(joypad::Y)
    }

    pub fn last_motion(&self) -> Option<(i16, i16)> {
        self.last_motion
    }
}

/// Synthesizes pointer and joystick events from the host pointer.
#[derive(Clone, Debug, Default)]
pub struct PointerOverlay {
    ports: [MouseLatch; POINTER_PORTS],
}

impl PointerOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn port(&self, port: usize) -> Option<&MouseLatch> {
        self.ports.get(port)
    }

    /// Translate one frame of pointer state. Does nothing in direct mode.
    ///
    /// Motion is fanned into the direction latches of `latches`.
    pub fn process<P, S>(
        &mut self,
        mode: InputMode,
        source: &P,
        latches: &mut LatchTable,
        sink: &mut S,
    ) where
        P: PollSource + ?Sized,
        S: InputSink + ?Sized,
    {
        if mode == InputMode::Direct {
            return;
        }

        let primary = PointerSample::read(source);
        for port in 0..POINTER_PORTS {
            // No multi-pointer fan-out: secondary ports only ever see an idle pointer.
            let sample = if port == PRIMARY_PORT {
                primary
            } else {
                PointerSample::default()
            };
            self.apply_buttons(port, sample.buttons, sink);
            if let Some(port_latches) = latches.port_mut(port) {
                fan_motion(port, sample, &mut port_latches.directions, sink);
            }
            if sample.dx != 0 || sample.dy != 0 {
                self.ports[port].last_motion = Some((sample.dx, sample.dy));
                sink.pointer_motion(port, sample.dx, sample.dy);
            }
        }
    }

    fn apply_buttons<S>(&mut self, port: usize, levels: [bool; 3], sink: &mut S)
    where
        S: InputSink + ?Sized,
    {
        let latch = &mut self.ports[port];
        for ((_, slot, alias), level) in BUTTONS.into_iter().zip(levels) {
            if let Some(down) = latch.buttons.edge(alias, level) {
                sink.pointer_button(port, slot, down);
            }
        }
    }

    /// Release every pointer button and forget the last motion.
    ///
    /// Motion-driven axes live in the shared direction latches and are
    /// centred by whoever releases those.
    pub fn release_all<S: InputSink + ?Sized>(&mut self, sink: &mut S) {
        for port in 0..POINTER_PORTS {
            self.apply_buttons(port, [false; 3], sink);
            self.ports[port].last_motion = None;
        }
    }
}

/// Fan one sample's motion into a port's direction latches. An axis without
/// motion keeps whatever is latched.
fn fan_motion<S: InputSink + ?Sized>(
    port: usize,
    sample: PointerSample,
    directions: &mut DirectionLatch,
    sink: &mut S,
) {
    if let Some(value) = fan_axis(&mut directions.vertical, sample.dy) {
        sink.axis_direction(port, Axis::Vertical, value);
    }
    if let Some(value) = fan_axis(&mut directions.horizontal, sample.dx) {
        sink.axis_direction(port, Axis::Horizontal, value);
    }
}

/// Run the direction set/clear rule with the motion sign as the level and
/// report the axis value if it differs from the value at the start of the
/// frame. A sign flip therefore reports the new direction only.
fn fan_axis(latch: &mut AxisLatch, delta: i16) -> Option<i8> {
    if delta == 0 {
        return None;
    }
    let before = latch.value();
    latch.step(delta < 0, delta > 0, |_| {});
    let after = latch.value();
    (before != after).then_some(after)
}
