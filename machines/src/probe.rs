//! Input probe machine.
//!
//! Stands in for the emulated Amiga: it keeps whatever the session tells it
//! and draws it. Held keys light up a 16x8 grid indexed by raw key code,
//! each controller port shows its axes and button slots, and the primary
//! pointer is drawn as a crosshair.
//!
//! The probe also produces refresh-rate reports. Pressing Help toggles
//! between PAL and NTSC. The oscillating variant instead alternates on its
//! own, every [`OSCILLATION_PERIOD`] frames, between PAL and a PAL-labeled
//! 59.4106 Hz signal, the way some games reprogram the chipset.

use log::info;
use retroport_core::core::machine::{Machine, TimingReport};
use retroport_core::core::sink::{Axis, InputSink};
use retroport_core::core::snapshot::MAX_PORTS;
use retroport_core::input::keymap::amiga;
use retroport_core::input::pointer::POINTER_PORTS;
use retroport_core::video::standard::{NTSC_HZ, PAL_HZ};

use crate::registry::MachineEntry;

pub const SCREEN_WIDTH: u32 = 360;
pub const SCREEN_HEIGHT: u32 = 284;

/// Frames between scripted timing reports.
pub const OSCILLATION_PERIOD: u64 = 120;

const PAL: TimingReport = TimingReport {
    is_ntsc: false,
    hz: PAL_HZ,
};

/// Refresh reports stepped through by Help.
const HELP_CYCLE: &[TimingReport] = &[
    PAL,
    TimingReport {
        is_ntsc: true,
        hz: NTSC_HZ,
    },
];

/// Refresh reports the oscillating variant alternates between.
const FLICKER_CYCLE: &[TimingReport] = &[
    PAL,
    TimingReport {
        is_ntsc: false,
        hz: 59.4106,
    },
];

const KEY_CODES: usize = 128;
const BUTTON_SLOTS: usize = 8;

// Colors (R, G, B)
const BACKGROUND_PAL: [u8; 3] = [0x10, 0x18, 0x38];
const BACKGROUND_NTSC: [u8; 3] = [0x10, 0x30, 0x18];
const CELL_IDLE: [u8; 3] = [0x30, 0x30, 0x40];
const CELL_LIT: [u8; 3] = [0xF0, 0xC0, 0x20];
const CELL_AXIS: [u8; 3] = [0x40, 0xD0, 0xF0];
const CROSSHAIR: [u8; 3] = [0xFF, 0xFF, 0xFF];

/// What the probe knows about one controller port.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PortView {
    pub horizontal: i8,
    pub vertical: i8,
    /// Bit n = virtual button slot n held.
    pub buttons: u8,
}

/// What the probe knows about one pointer port.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerView {
    pub x: i32,
    pub y: i32,
    /// Bit n = pointer button slot n held.
    pub buttons: u8,
}

pub struct ProbeMachine {
    keys: [bool; KEY_CODES],
    ports: [PortView; MAX_PORTS],
    pointers: [PointerView; POINTER_PORTS],
    frames: u64,
    redraws: u32,
    cycle: &'static [TimingReport],
    timing_index: usize,
    pending_report: Option<TimingReport>,
    /// Step the timing cycle automatically instead of on Help.
    oscillating: bool,
}

impl ProbeMachine {
    pub fn new() -> Self {
        Self {
            keys: [false; KEY_CODES],
            ports: [PortView::default(); MAX_PORTS],
            pointers: [Self::centred_pointer(); POINTER_PORTS],
            frames: 0,
            redraws: 0,
            cycle: HELP_CYCLE,
            timing_index: 0,
            pending_report: None,
            oscillating: false,
        }
    }

    /// A probe whose refresh rate flips between PAL and a PAL-labeled
    /// 60 Hz signal by itself.
    pub fn oscillating() -> Self {
        Self {
            cycle: FLICKER_CYCLE,
            oscillating: true,
            ..Self::new()
        }
    }

    fn centred_pointer() -> PointerView {
        PointerView {
            x: SCREEN_WIDTH as i32 / 2,
            y: SCREEN_HEIGHT as i32 / 2,
            buttons: 0,
        }
    }

    pub fn is_key_down(&self, code: u8) -> bool {
        self.keys.get(code as usize).copied().unwrap_or(false)
    }

    pub fn port(&self, port: usize) -> Option<PortView> {
        self.ports.get(port).copied()
    }

    pub fn pointer(&self, port: usize) -> Option<PointerView> {
        self.pointers.get(port).copied()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Full redraws requested so far.
    pub fn redraws(&self) -> u32 {
        self.redraws
    }

    /// The refresh rate the probe currently claims.
    pub fn timing(&self) -> TimingReport {
        self.cycle[self.timing_index]
    }

    fn step_timing(&mut self) {
        self.timing_index = (self.timing_index + 1) % self.cycle.len();
        let report = self.timing();
        info!(
            "probe: signal now {:.4} Hz, labeled {}",
            report.hz,
            if report.is_ntsc { "NTSC" } else { "PAL" }
        );
        self.pending_report = Some(report);
    }

    fn fill_rect(buffer: &mut [u8], x: i32, y: i32, w: i32, h: i32, color: [u8; 3]) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(SCREEN_WIDTH as i32);
        let y1 = (y + h).min(SCREEN_HEIGHT as i32);
        for py in y0..y1 {
            for px in x0..x1 {
                let offset = (py as usize * SCREEN_WIDTH as usize + px as usize) * 3;
                buffer[offset..offset + 3].copy_from_slice(&color);
            }
        }
    }

    fn draw_keys(&self, buffer: &mut [u8]) {
        for (code, &down) in self.keys.iter().enumerate() {
            let col = (code % 16) as i32;
            let row = (code / 16) as i32;
            let color = if down { CELL_LIT } else { CELL_IDLE };
            Self::fill_rect(buffer, 20 + col * 20, 8 + row * 12, 18, 10, color);
        }
    }

    fn draw_ports(&self, buffer: &mut [u8]) {
        for (index, view) in self.ports.iter().enumerate() {
            let x = 20 + index as i32 * 85;
            let y = 116;

            // Direction cross: 3x3 cells, the asserted direction lit.
            let cells = [
                (1, 0, view.vertical < 0),
                (1, 2, view.vertical > 0),
                (0, 1, view.horizontal < 0),
                (2, 1, view.horizontal > 0),
            ];
            for (cx, cy, lit) in cells {
                let color = if lit { CELL_AXIS } else { CELL_IDLE };
                Self::fill_rect(buffer, x + cx * 14, y + cy * 14, 12, 12, color);
            }

            for slot in 0..BUTTON_SLOTS as i32 {
                let lit = view.buttons & (1 << slot) != 0;
                let color = if lit { CELL_LIT } else { CELL_IDLE };
                Self::fill_rect(buffer, x + slot * 10, y + 46, 8, 8, color);
            }
        }
    }

    fn draw_pointer(&self, buffer: &mut [u8]) {
        let pointer = self.pointers[0];
        Self::fill_rect(buffer, pointer.x - 5, pointer.y, 11, 1, CROSSHAIR);
        Self::fill_rect(buffer, pointer.x, pointer.y - 5, 1, 11, CROSSHAIR);

        for slot in 0..3 {
            let lit = pointer.buttons & (1 << slot) != 0;
            let color = if lit { CELL_LIT } else { CELL_IDLE };
            Self::fill_rect(buffer, 20 + slot * 14, SCREEN_HEIGHT as i32 - 20, 12, 12, color);
        }
    }
}

impl Default for ProbeMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSink for ProbeMachine {
    fn key_down(&mut self, code: u8) {
        if let Some(key) = self.keys.get_mut(code as usize) {
            *key = true;
        }
        if code == amiga::HELP && !self.oscillating {
            self.step_timing();
        }
    }

    fn key_up(&mut self, code: u8) {
        if let Some(key) = self.keys.get_mut(code as usize) {
            *key = false;
        }
    }

    fn pointer_motion(&mut self, port: usize, dx: i16, dy: i16) {
        if let Some(pointer) = self.pointers.get_mut(port) {
            pointer.x = (pointer.x + dx as i32).clamp(0, SCREEN_WIDTH as i32 - 1);
            pointer.y = (pointer.y + dy as i32).clamp(0, SCREEN_HEIGHT as i32 - 1);
        }
    }

    fn pointer_button(&mut self, port: usize, slot: u8, down: bool) {
        if let Some(pointer) = self.pointers.get_mut(port) {
            set_bit(&mut pointer.buttons, slot, down);
        }
    }

    fn axis_button(&mut self, port: usize, slot: u8, down: bool) {
        if let Some(view) = self.ports.get_mut(port) {
            set_bit(&mut view.buttons, slot, down);
        }
    }

    fn axis_direction(&mut self, port: usize, axis: Axis, value: i8) {
        if let Some(view) = self.ports.get_mut(port) {
            match axis {
                Axis::Horizontal => view.horizontal = value,
                Axis::Vertical => view.vertical = value,
            }
        }
    }
}

fn set_bit(bits: &mut u8, slot: u8, down: bool) {
    if slot as usize >= BUTTON_SLOTS {
        return;
    }
    if down {
        *bits |= 1 << slot;
    } else {
        *bits &= !(1 << slot);
    }
}

impl Machine for ProbeMachine {
    fn display_size(&self) -> (u32, u32) {
        (SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    fn run_frame(&mut self) {
        self.frames += 1;
        if self.oscillating && self.frames % OSCILLATION_PERIOD == 0 {
            self.step_timing();
        }
    }

    fn render_frame(&self, buffer: &mut [u8]) {
        let background = if self.timing().is_ntsc {
            BACKGROUND_NTSC
        } else {
            BACKGROUND_PAL
        };
        for pixel in buffer.chunks_exact_mut(3) {
            pixel.copy_from_slice(&background);
        }
        self.draw_keys(buffer);
        self.draw_ports(buffer);
        self.draw_pointer(buffer);
    }

    fn invalidate_display(&mut self) {
        self.redraws += 1;
    }

    fn take_timing_report(&mut self) -> Option<TimingReport> {
        self.pending_report.take()
    }

    fn reset(&mut self) {
        *self = Self {
            cycle: self.cycle,
            oscillating: self.oscillating,
            ..Self::new()
        };
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

fn create_probe() -> Box<dyn Machine> {
    Box::new(ProbeMachine::new())
}

fn create_oscillating_probe() -> Box<dyn Machine> {
    Box::new(ProbeMachine::oscillating())
}

inventory::submit! {
    MachineEntry::new("probe", "Input probe; Help steps the refresh rate", create_probe)
}

inventory::submit! {
    MachineEntry::new(
        "probe-flicker",
        "Input probe whose refresh rate oscillates on its own",
        create_oscillating_probe,
    )
}
