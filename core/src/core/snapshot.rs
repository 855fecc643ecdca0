//! Value-type poll source.
//!
//! Hosts fill an [`InputSnapshot`] from whatever their platform reports and
//! hand it to the session as the frame's [`PollSource`]. Tests script it
//! directly.

use super::host::{Device, PollSource, joypad, mouse};

/// Number of key slots a snapshot can hold.
pub const KEY_SLOTS: usize = 512;

/// Number of independent controller ports.
pub const MAX_PORTS: usize = 4;

/// One frame of primary pointer state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MouseSample {
    pub dx: i16,
    pub dy: i16,
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

/// Keyboard levels, joypad button masks and one mouse sample.
#[derive(Clone, Debug)]
pub struct InputSnapshot {
    keys: [bool; KEY_SLOTS],
    joypads: [u16; MAX_PORTS],
    mouse: MouseSample,
    polls: u64,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self {
            keys: [false; KEY_SLOTS],
            joypads: [0; MAX_PORTS],
            mouse: MouseSample::default(),
            polls: 0,
        }
    }

    /// Set the level of one host key code. Codes beyond the snapshot are ignored.
    pub fn set_key(&mut self, code: usize, pressed: bool) {
        if let Some(slot) = self.keys.get_mut(code) {
            *slot = pressed;
        }
    }

    pub fn key(&self, code: usize) -> bool {
        self.keys.get(code).copied().unwrap_or(false)
    }

    /// Set one RetroPad button (see [`joypad`]) on a port.
    pub fn set_button(&mut self, port: usize, id: u32, pressed: bool) {
        if port >= MAX_PORTS || id as usize >= joypad::COUNT {
            return;
        }
        let bit = 1u16 << id;
        if pressed {
            self.joypads[port] |= bit;
        } else {
            self.joypads[port] &= !bit;
        }
    }

    /// Replace a port's whole button mask (bit n = button id n).
    pub fn set_joypad(&mut self, port: usize, mask: u16) {
        if let Some(pad) = self.joypads.get_mut(port) {
            *pad = mask;
        }
    }

    pub fn joypad(&self, port: usize) -> u16 {
        self.joypads.get(port).copied().unwrap_or(0)
    }

    pub fn set_mouse(&mut self, sample: MouseSample) {
        self.mouse = sample;
    }

    pub fn mouse(&self) -> MouseSample {
        self.mouse
    }

    /// Release every key and button and zero the pointer motion.
    pub fn clear(&mut self) {
        self.keys = [false; KEY_SLOTS];
        self.joypads = [0; MAX_PORTS];
        self.mouse = MouseSample::default();
    }

    /// How many times the session has polled this snapshot.
    pub fn poll_count(&self) -> u64 {
        self.polls
    }
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl PollSource for InputSnapshot {
    fn poll(&mut self) {
        self.polls += 1;
    }

    fn query(&self, port: usize, device: Device, _index: u32, id: u32) -> i16 {
        match device {
            Device::Keyboard => self.key(id as usize) as i16,
            Device::Joypad => {
                if id as usize >= joypad::COUNT {
                    return 0;
                }
                ((self.joypad(port) >> id) & 1) as i16
            }
            // A single physical pointer, reported on port 0 only.
            Device::Mouse if port == 0 => match id {
                mouse::X => self.mouse.dx,
                mouse::Y => self.mouse.dy,
                mouse::LEFT => self.mouse.left as i16,
                mouse::RIGHT => self.mouse.right as i16,
                mouse::MIDDLE => self.mouse.middle as i16,
                _ => 0,
            },
            Device::Mouse => 0,
        }
    }
}
