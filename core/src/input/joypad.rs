//! Controller port translation: direction conflict resolution and button
//! edge mapping.

use super::InputMode;
use super::controller::{self, ControllerClass};
use super::latch::{ButtonLatch, DirectionLatch, PortLatches};
use crate::core::host::{Device, PollSource, joypad};
use crate::core::sink::{Axis, InputSink};

/// Reduce a port's four direction levels to at most one value per axis and
/// emit the transitions.
///
/// Runs in [`InputMode::Overlay`] only; in direct mode the keyboard owns the
/// joystick and the latches are left as they are.
pub fn resolve_directions<P, S>(
    mode: InputMode,
    port: usize,
    source: &P,
    latch: &mut DirectionLatch,
    sink: &mut S,
) where
    P: PollSource + ?Sized,
    S: InputSink + ?Sized,
{
    if mode == InputMode::Direct {
        return;
    }

    let level = |id| source.pressed(port, Device::Joypad, id);

    let (up, down) = (level(joypad::UP), level(joypad::DOWN));
    latch.vertical.step(up, down, |value| {
        sink.axis_direction(port, Axis::Vertical, value)
    });

    let (left, right) = (level(joypad::LEFT), level(joypad::RIGHT));
    latch.horizontal.step(left, right, |value| {
        sink.axis_direction(port, Axis::Horizontal, value)
    });
}

/// Emit press/release edges for the buttons a port's class polls.
pub fn map_buttons<P, S>(
    mode: InputMode,
    port: usize,
    class: ControllerClass,
    source: &P,
    latch: &mut ButtonLatch,
    sink: &mut S,
) where
    P: PollSource + ?Sized,
    S: InputSink + ?Sized,
{
    if mode == InputMode::Direct {
        return;
    }

    for &id in class.buttons() {
        let Some(slot) = controller::virtual_slot(id) else {
            continue;
        };
        let level = source.pressed(port, Device::Joypad, id);
        if let Some(down) = latch.edge(id, level) {
            sink.axis_button(port, slot, down);
        }
    }
}

/// Tell the machine everything a port holds has been let go, and clear the
/// port's latches.
pub fn release_port<S: InputSink + ?Sized>(port: usize, latches: &mut PortLatches, sink: &mut S) {
    latches
        .directions
        .vertical
        .release(|value| sink.axis_direction(port, Axis::Vertical, value));
    latches
        .directions
        .horizontal
        .release(|value| sink.axis_direction(port, Axis::Horizontal, value));

    let held: Vec<u32> = latches.buttons.held().collect();
    for id in held {
        latches.buttons.edge(id, false);
        if let Some(slot) = controller::virtual_slot(id) {
            sink.axis_button(port, slot, false);
        }
    }
}

/// Three-character rendering of a port's latched state.
///
/// Column 0 shows `<`, column 2 `>`, column 1 `^` or `v`; a held fire
/// button replaces column 1 with `1` (B), `2` (A) or `3` (both) and sets its
/// high bit.
pub fn port_status(latches: &PortLatches) -> [u8; 3] {
    let mut text = *b"   ";
    let directions = &latches.directions;
    let buttons = &latches.buttons;

    if directions.up() {
        text[1] = b'^';
    }
    if directions.down() {
        text[1] = b'v';
    }
    if directions.left() {
        text[0] = b'<';
    }
    if directions.right() {
        text[2] = b'>';
    }

    let fire_b = buttons.is_down(joypad::B);
    let fire_a = buttons.is_down(joypad::A);
    match (fire_b, fire_a) {
        (true, true) => text[1] = b'3',
        (true, false) => text[1] = b'1',
        (false, true) => text[1] = b'2',
        (false, false) => {}
    }
    if fire_b || fire_a {
        text[1] |= 0x80;
    }
    text
}
