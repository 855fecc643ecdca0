//! Key edge detection over the polled keyboard bitmap.

use log::debug;

use super::InputMode;
use super::keymap::{self, POLLED_KEYS, amiga};
use crate::core::host::{Device, PollSource};
use crate::core::sink::{DisplaySink, InputSink};
use crate::core::snapshot::KEY_SLOTS;

/// Edge state recorded for one key slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum KeyEdge {
    #[default]
    Released,
    Pressed,
    /// Pressed while the shift lock was on; a synthetic shift went down
    /// with it and must come up with it.
    PressedShifted,
}

/// Number of distinct Amiga key codes.
const AMIGA_CODES: usize = 0x80;

/// Turns per-frame key levels into key-down/key-up events.
///
/// Caps Lock toggles a shift lock instead of being held. Right Alt is passed
/// through and, while held, switches input to [`InputMode::Direct`].
///
/// Several host keys can share one Amiga code, and the synthetic shift shares
/// the left shift's code. Each Amiga code therefore counts its holders: the
/// machine sees a key go down with the first and up with the last.
pub struct KeyEdgeDetector {
    edges: [KeyEdge; KEY_SLOTS],
    holders: [u8; AMIGA_CODES],
    shift_lock: bool,
    alternate: bool,
}

impl KeyEdgeDetector {
    pub fn new() -> Self {
        Self {
            edges: [KeyEdge::Released; KEY_SLOTS],
            holders: [0; AMIGA_CODES],
            shift_lock: false,
            alternate: false,
        }
    }

    pub fn shift_lock(&self) -> bool {
        self.shift_lock
    }

    pub fn mode(&self) -> InputMode {
        if self.alternate {
            InputMode::Direct
        } else {
            InputMode::Overlay
        }
    }

    /// Whether a key slot is currently recorded as down.
    pub fn is_down(&self, host_code: usize) -> bool {
        self.edges
            .get(host_code)
            .is_some_and(|&edge| edge != KeyEdge::Released)
    }

    /// Whether the machine has been told an Amiga key is down.
    pub fn is_code_down(&self, code: u8) -> bool {
        self.holders.get(code as usize).is_some_and(|&count| count > 0)
    }

    /// Scan one frame of keyboard levels.
    pub fn process<P, S, D>(&mut self, source: &P, sink: &mut S, display: &mut D)
    where
        P: PollSource + ?Sized,
        S: InputSink + ?Sized,
        D: DisplaySink + ?Sized,
    {
        for slot in 0..POLLED_KEYS {
            let Some(code) = keymap::translate(slot) else {
                continue;
            };
            let level = source.pressed(0, Device::Keyboard, slot as u32);

            match code {
                amiga::CAPS_LOCK => self.caps_lock(slot, code, level, sink, display),
                amiga::RIGHT_ALT => self.alternate(slot, code, level, sink),
                _ => self.ordinary(slot, code, level, sink),
            }
        }
    }

    fn caps_lock<S, D>(&mut self, slot: usize, code: u8, level: bool, sink: &mut S, display: &mut D)
    where
        S: InputSink + ?Sized,
        D: DisplaySink + ?Sized,
    {
        match (level, self.edges[slot]) {
            (true, KeyEdge::Released) => {
                sink.key_down(code);
                sink.key_up(code);
                self.shift_lock = !self.shift_lock;
                display.invalidate();
                self.edges[slot] = KeyEdge::Pressed;
                debug!("shift lock {}", if self.shift_lock { "on" } else { "off" });
            }
            (false, KeyEdge::Pressed | KeyEdge::PressedShifted) => {
                self.edges[slot] = KeyEdge::Released;
            }
            _ => {}
        }
    }

    fn alternate<S: InputSink + ?Sized>(&mut self, slot: usize, code: u8, level: bool, sink: &mut S) {
        match (level, self.edges[slot]) {
            (true, KeyEdge::Released) => {
                self.alternate = true;
                self.press(code, sink);
                self.edges[slot] = KeyEdge::Pressed;
                debug!("keyboard takes over port 0 joystick");
            }
            (false, KeyEdge::Pressed | KeyEdge::PressedShifted) => {
                self.alternate = false;
                self.lift(code, sink);
                self.edges[slot] = KeyEdge::Released;
                debug!("controller overlay restored");
            }
            _ => {}
        }
    }

    fn ordinary<S: InputSink + ?Sized>(&mut self, slot: usize, code: u8, level: bool, sink: &mut S) {
        match (level, self.edges[slot]) {
            (true, KeyEdge::Released) => {
                if self.shift_lock {
                    self.press(keymap::SHIFT_CODE, sink);
                    self.press(code, sink);
                    self.edges[slot] = KeyEdge::PressedShifted;
                } else {
                    self.press(code, sink);
                    self.edges[slot] = KeyEdge::Pressed;
                }
            }
            (false, KeyEdge::Pressed) => {
                self.lift(code, sink);
                self.edges[slot] = KeyEdge::Released;
            }
            (false, KeyEdge::PressedShifted) => {
                self.lift(code, sink);
                self.lift(keymap::SHIFT_CODE, sink);
                self.edges[slot] = KeyEdge::Released;
            }
            _ => {}
        }
    }

    fn press<S: InputSink + ?Sized>(&mut self, code: u8, sink: &mut S) {
        let Some(count) = self.holders.get_mut(code as usize) else {
            return;
        };
        *count = count.saturating_add(1);
        if *count == 1 {
            sink.key_down(code);
        }
    }

    fn lift<S: InputSink + ?Sized>(&mut self, code: u8, sink: &mut S) {
        let Some(count) = self.holders.get_mut(code as usize) else {
            return;
        };
        if *count == 0 {
            return;
        }
        *count -= 1;
        if *count == 0 {
            sink.key_up(code);
        }
    }

    /// Release every key still recorded as down and drop the shift lock.
    pub fn release_all<S: InputSink + ?Sized>(&mut self, sink: &mut S) {
        for slot in 0..POLLED_KEYS {
            let Some(code) = keymap::translate(slot) else {
                continue;
            };
            match self.edges[slot] {
                KeyEdge::Released => continue,
                // The lock key's press was already a complete pulse.
                KeyEdge::Pressed if code == amiga::CAPS_LOCK => {}
                KeyEdge::Pressed => self.lift(code, sink),
                KeyEdge::PressedShifted => {
                    self.lift(code, sink);
                    self.lift(keymap::SHIFT_CODE, sink);
                }
            }
            self.edges[slot] = KeyEdge::Released;
        }
        self.holders = [0; AMIGA_CODES];
        self.shift_lock = false;
        self.alternate = false;
    }
}

impl Default for KeyEdgeDetector {
    fn default() -> Self {
        Self::new()
    }
}
