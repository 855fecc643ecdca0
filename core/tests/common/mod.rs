#![allow(dead_code)]

use retroport_core::core::{
    AvSink, Axis, Device, DisplaySink, InputEvent, InputSink, InputSnapshot, Machine, PollSource,
    TimingReport,
};
use retroport_core::video::Geometry;

/// Display sink that counts invalidations.
#[derive(Default)]
pub struct CountingDisplay {
    pub invalidations: u32,
}

impl DisplaySink for CountingDisplay {
    fn invalidate(&mut self) {
        self.invalidations += 1;
    }
}

/// AV sink that records every push in order.
#[derive(Default)]
pub struct AvRecorder {
    pub geometries: Vec<Geometry>,
    pub frame_rates: Vec<f64>,
}

impl AvRecorder {
    pub fn clear(&mut self) {
        self.geometries.clear();
        self.frame_rates.clear();
    }
}

impl AvSink for AvRecorder {
    fn set_geometry(&mut self, geometry: &Geometry) {
        self.geometries.push(*geometry);
    }

    fn set_frame_rate(&mut self, hz: f64) {
        self.frame_rates.push(hz);
    }
}

/// Scripted host: a snapshot to poll plus an AV recorder.
#[derive(Default)]
pub struct TestHost {
    pub input: InputSnapshot,
    pub av: AvRecorder,
}

impl PollSource for TestHost {
    fn poll(&mut self) {
        self.input.poll();
    }

    fn query(&self, port: usize, device: Device, index: u32, id: u32) -> i16 {
        self.input.query(port, device, index, id)
    }
}

impl AvSink for TestHost {
    fn set_geometry(&mut self, geometry: &Geometry) {
        self.av.set_geometry(geometry);
    }

    fn set_frame_rate(&mut self, hz: f64) {
        self.av.set_frame_rate(hz);
    }
}

/// Machine that records what it is told and when.
#[derive(Default)]
pub struct RecordingMachine {
    pub events: Vec<InputEvent>,
    /// Number of events received before each `run_frame()`.
    pub events_at_frame: Vec<usize>,
    pub frames: u32,
    pub invalidations: u32,
    pub resets: u32,
    pub pending_report: Option<TimingReport>,
}

impl RecordingMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, is_ntsc: bool, hz: f64) {
        self.pending_report = Some(TimingReport { is_ntsc, hz });
    }
}

impl InputSink for RecordingMachine {
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

impl Machine for RecordingMachine {
    fn display_size(&self) -> (u32, u32) {
        (16, 16)
    }

    fn run_frame(&mut self) {
        self.events_at_frame.push(self.events.len());
        self.frames += 1;
    }

    fn render_frame(&self, buffer: &mut [u8]) {
        buffer.fill(0);
    }

    fn invalidate_display(&mut self) {
        self.invalidations += 1;
    }

    fn take_timing_report(&mut self) -> Option<TimingReport> {
        self.pending_report.take()
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}

/// Key-down/key-up events only, in order.
pub fn key_events(events: &[InputEvent]) -> Vec<InputEvent> {
    events
        .iter()
        .copied()
        .filter(|e| matches!(e, InputEvent::KeyDown(_) | InputEvent::KeyUp(_)))
        .collect()
}

/// Axis values emitted for one port and axis, in order.
pub fn axis_values(events: &[InputEvent], port: usize, axis: Axis) -> Vec<i8> {
    events
        .iter()
        .filter_map(|e| match *e {
            InputEvent::AxisDirection {
                port: p,
                axis: a,
                value,
            } if p == port && a == axis => Some(value),
            _ => None,
        })
        .collect()
}
