//! Outbound boundaries: translated input events, display invalidation and
//! geometry/timing updates.

use crate::video::Geometry;

/// Joystick axis of a virtual controller port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// The emulated machine's input subsystem.
///
/// Calls are fire-and-forget. `code` is an Amiga raw key code; `slot` is a
/// virtual button number on the port; `value` of an axis is -1, 0 or 1.
pub trait InputSink {
    fn key_down(&mut self, code: u8);
    fn key_up(&mut self, code: u8);
    fn pointer_motion(&mut self, port: usize, dx: i16, dy: i16);
    fn pointer_button(&mut self, port: usize, slot: u8, down: bool);
    fn axis_button(&mut self, port: usize, slot: u8, down: bool);
    fn axis_direction(&mut self, port: usize, axis: Axis, value: i8);
}

/// Full-redraw request, owned by rendering.
pub trait DisplaySink {
    fn invalidate(&mut self);
}

/// Host-side geometry and frame-rate declarations.
pub trait AvSink {
    fn set_geometry(&mut self, geometry: &Geometry);
    fn set_frame_rate(&mut self, hz: f64);
}

/// One call on an [`InputSink`], captured as data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(u8),
    KeyUp(u8),
    PointerMotion { port: usize, dx: i16, dy: i16 },
    PointerButton { port: usize, slot: u8, down: bool },
    AxisButton { port: usize, slot: u8, down: bool },
    AxisDirection { port: usize, axis: Axis, value: i8 },
}

impl InputEvent {
    /// Replay this event on a sink.
    pub fn dispatch<S: InputSink + ?Sized>(self, sink: &mut S) {
        match self {
            Self::KeyDown(code) => sink.key_down(code),
            Self::KeyUp(code) => sink.key_up(code),
            Self::PointerMotion { port, dx, dy } => sink.pointer_motion(port, dx, dy),
            Self::PointerButton { port, slot, down } => sink.pointer_button(port, slot, down),
            Self::AxisButton { port, slot, down } => sink.axis_button(port, slot, down),
            Self::AxisDirection { port, axis, value } => sink.axis_direction(port, axis, value),
        }
    }
}

impl InputSink for Vec<InputEvent> {
    fn key_down(&mut self, code: u8) {
        self.push(InputEvent::KeyDown(code));
    }

    fn key_up(&mut self, code: u8) {
        self.push(InputEvent::KeyUp(code));
    }

    fn pointer_motion(&mut self, port: usize, dx: i16, dy: i16) {
        self.push(InputEvent::PointerMotion { port, dx, dy });
    }

    fn pointer_button(&mut self, port: usize, slot: u8, down: bool) {
        self.push(InputEvent::PointerButton { port, slot, down });
    }

    fn axis_button(&mut self, port: usize, slot: u8, down: bool) {
        self.push(InputEvent::AxisButton { port, slot, down });
    }

    fn axis_direction(&mut self, port: usize, axis: Axis, value: i8) {
        self.push(InputEvent::AxisDirection { port, axis, value });
    }
}

/// Events translated during the host turn, waiting to be delivered.
///
/// The session drains the queue into the machine before handing the turn
/// over, so the machine never advances with undelivered input.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<InputEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Deliver every queued event in order and leave the queue empty.
    /// Returns the number of events delivered.
    pub fn drain_into<S: InputSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        let count = self.events.len();
        for event in self.events.drain(..) {
            event.dispatch(sink);
        }
        count
    }
}

impl InputSink for EventQueue {
    fn key_down(&mut self, code: u8) {
        self.events.key_down(code);
    }

    fn key_up(&mut self, code: u8) {
        self.events.key_up(code);
    }

    fn pointer_motion(&mut self, port: usize, dx: i16, dy: i16) {
        self.events.pointer_motion(port, dx, dy);
    }

    fn pointer_button(&mut self, port: usize, slot: u8, down: bool) {
        self.events.pointer_button(port, slot, down);
    }

    fn axis_button(&mut self, port: usize, slot: u8, down: bool) {
        self.events.axis_button(port, slot, down);
    }

    fn axis_direction(&mut self, port: usize, axis: Axis, value: i8) {
        self.events.axis_direction(port, axis, value);
    }
}

/// Latched redraw request, forwarded once per frame.
#[derive(Debug, Default)]
pub struct RedrawRequest {
    pending: bool,
}

impl RedrawRequest {
    /// Return whether a redraw was requested since the last call, and clear it.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl DisplaySink for RedrawRequest {
    fn invalidate(&mut self) {
        self.pending = true;
    }
}
