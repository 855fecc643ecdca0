use retroport_core::core::machine::Machine;
use retroport_core::core::sink::{Axis, AvSink, InputSink};
use retroport_core::core::{Device, InputSnapshot, PollSource};
use retroport_core::input::keymap::{amiga, retrok};
use retroport_core::session::{Session, SessionConfig};
use retroport_core::video::Geometry;
use retroport_core::video::standard::{NTSC_HZ, PAL_HZ};
use retroport_machines::probe::{OSCILLATION_PERIOD, SCREEN_HEIGHT, SCREEN_WIDTH};
use retroport_machines::{ProbeMachine, registry};

fn pixel(buffer: &[u8], x: u32, y: u32) -> [u8; 3] {
    let offset = ((y * SCREEN_WIDTH + x) * 3) as usize;
    [buffer[offset], buffer[offset + 1], buffer[offset + 2]]
}

fn render(probe: &ProbeMachine) -> Vec<u8> {
    let (w, h) = probe.display_size();
    let mut buffer = vec![0u8; (w * h * 3) as usize];
    probe.render_frame(&mut buffer);
    buffer
}

// =================================================================
// Machine Trait Tests
// =================================================================

#[test]
fn test_display_size() {
    let probe = ProbeMachine::new();
    assert_eq!(probe.display_size(), (360, 284));
}

#[test]
fn test_render_frame_lights_held_key() {
    let mut probe = ProbeMachine::new();
    // Key 0x20 sits in column 0, row 2 of the grid.
    let idle = pixel(&render(&probe), 21, 33);

    probe.key_down(amiga::A);
    let buffer = render(&probe);
    assert_ne!(pixel(&buffer, 21, 33), idle);
    assert_eq!(pixel(&buffer, 21, 33), [0xF0, 0xC0, 0x20]);

    probe.key_up(amiga::A);
    assert_eq!(pixel(&render(&probe), 21, 33), idle);
}

#[test]
fn test_render_frame_background_follows_region() {
    let mut probe = ProbeMachine::new();
    let pal = pixel(&render(&probe), 0, 0);
    probe.key_down(amiga::HELP);
    let ntsc = pixel(&render(&probe), 0, 0);
    assert_ne!(pal, ntsc);
}

#[test]
fn test_run_frame_counts() {
    let mut probe = ProbeMachine::new();
    probe.run_frame();
    probe.run_frame();
    assert_eq!(probe.frames(), 2);
}

#[test]
fn test_invalidate_counts_redraws() {
    let mut probe = ProbeMachine::new();
    probe.invalidate_display();
    assert_eq!(probe.redraws(), 1);
}

// =================================================================
// Input Sink Tests
// =================================================================

#[test]
fn test_axis_and_button_views() {
    let mut probe = ProbeMachine::new();
    probe.axis_direction(1, Axis::Vertical, -1);
    probe.axis_direction(1, Axis::Horizontal, 1);
    probe.axis_button(1, 0, true);
    probe.axis_button(1, 6, true);

    let view = probe.port(1).unwrap();
    assert_eq!(view.vertical, -1);
    assert_eq!(view.horizontal, 1);
    assert_eq!(view.buttons, 0b0100_0001);

    probe.axis_button(1, 0, false);
    probe.axis_direction(1, Axis::Vertical, 0);
    assert_eq!(probe.port(1).unwrap().buttons, 0b0100_0000);
    assert_eq!(probe.port(1).unwrap().vertical, 0);
}

#[test]
fn test_out_of_range_input_is_ignored() {
    let mut probe = ProbeMachine::new();
    probe.axis_button(7, 0, true);
    probe.axis_button(0, 12, true);
    probe.pointer_motion(5, 1, 1);
    probe.key_down(0xF0);
    assert_eq!(probe.port(0).unwrap().buttons, 0);
    assert!(!probe.is_key_down(0xF0));
}

#[test]
fn test_views_of_missing_ports_are_none() {
    let probe = ProbeMachine::new();
    assert!(probe.port(3).is_some());
    assert_eq!(probe.port(4), None);
    assert!(probe.pointer(1).is_some());
    assert_eq!(probe.pointer(2), None);
}

#[test]
fn test_pointer_motion_is_clamped() {
    let mut probe = ProbeMachine::new();
    let start = probe.pointer(0).unwrap();
    assert_eq!((start.x, start.y), (180, 142));

    probe.pointer_motion(0, 10, -4);
    let moved = probe.pointer(0).unwrap();
    assert_eq!((moved.x, moved.y), (190, 138));

    probe.pointer_motion(0, i16::MAX, i16::MIN);
    let clamped = probe.pointer(0).unwrap();
    assert_eq!((clamped.x, clamped.y), (SCREEN_WIDTH as i32 - 1, 0));
}

#[test]
fn test_pointer_buttons() {
    let mut probe = ProbeMachine::new();
    probe.pointer_button(0, 1, true);
    assert_eq!(probe.pointer(0).unwrap().buttons, 0b010);
}

// =================================================================
// Timing Reports
// =================================================================

#[test]
fn test_help_toggles_pal_and_ntsc() {
    let mut probe = ProbeMachine::new();
    assert_eq!(probe.take_timing_report(), None);

    probe.key_down(amiga::HELP);
    let report = probe.take_timing_report().unwrap();
    assert!(report.is_ntsc);
    assert_eq!(report.hz, NTSC_HZ);
    assert_eq!(probe.take_timing_report(), None);

    probe.key_up(amiga::HELP);
    probe.key_down(amiga::HELP);
    let report = probe.take_timing_report().unwrap();
    assert!(!report.is_ntsc);
    assert_eq!(report.hz, PAL_HZ);
}

#[test]
fn test_oscillating_probe_reports_on_its_own() {
    let mut probe = ProbeMachine::oscillating();
    probe.key_down(amiga::HELP);
    assert_eq!(probe.take_timing_report(), None);

    for _ in 0..OSCILLATION_PERIOD - 1 {
        probe.run_frame();
    }
    assert_eq!(probe.take_timing_report(), None);
    probe.run_frame();
    let report = probe.take_timing_report().unwrap();
    // Still labeled PAL, but running at 60 Hz.
    assert!(!report.is_ntsc);
    assert!(report.hz > 59.0);

    for _ in 0..OSCILLATION_PERIOD {
        probe.run_frame();
    }
    assert_eq!(probe.take_timing_report().map(|r| r.hz), Some(PAL_HZ));
}

#[test]
fn test_reset_clears_state_but_keeps_variant() {
    let mut probe = ProbeMachine::oscillating();
    probe.key_down(amiga::SPACE);
    probe.axis_button(0, 0, true);
    probe.run_frame();
    probe.reset();

    assert!(!probe.is_key_down(amiga::SPACE));
    assert_eq!(probe.port(0).unwrap().buttons, 0);
    assert_eq!(probe.frames(), 0);

    for _ in 0..OSCILLATION_PERIOD {
        probe.run_frame();
    }
    assert!(probe.take_timing_report().is_some());
}

// =================================================================
// Registry Tests
// =================================================================

#[test]
fn test_registry_lists_probes_sorted() {
    let names: Vec<_> = registry::all().iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["probe", "probe-flicker"]);
}

#[test]
fn test_registry_find_creates_machine() {
    let entry = registry::find("probe").unwrap();
    let machine = (entry.create)();
    assert_eq!(machine.display_size(), (SCREEN_WIDTH, SCREEN_HEIGHT));
    assert!(registry::find("amiga500").is_none());
}

// =================================================================
// Session Integration
// =================================================================

#[derive(Default)]
struct Host {
    input: InputSnapshot,
    rates: Vec<f64>,
    geometries: Vec<Geometry>,
}

impl PollSource for Host {
    fn poll(&mut self) {
        self.input.poll();
    }

    fn query(&self, port: usize, device: Device, index: u32, id: u32) -> i16 {
        self.input.query(port, device, index, id)
    }
}

impl AvSink for Host {
    fn set_geometry(&mut self, geometry: &Geometry) {
        self.geometries.push(*geometry);
    }

    fn set_frame_rate(&mut self, hz: f64) {
        self.rates.push(hz);
    }
}

#[test]
fn test_help_key_renegotiates_through_session() {
    let mut session = Session::new(&SessionConfig::default());
    let mut host = Host::default();
    let mut probe = ProbeMachine::new();

    session.run_frame(&mut host, &mut probe);
    host.input.set_key(retrok::HELP as usize, true);
    // Delivered this frame, reported and negotiated on the next.
    session.run_frame(&mut host, &mut probe);
    assert!(probe.is_key_down(amiga::HELP));
    assert!(host.rates.is_empty());

    session.run_frame(&mut host, &mut probe);
    assert_eq!(host.rates, vec![NTSC_HZ]);
    assert_eq!(host.geometries.last().map(|g| g.height), Some(480));

    host.input.set_key(retrok::HELP as usize, false);
    session.run_frame(&mut host, &mut probe);
    host.input.set_key(retrok::HELP as usize, true);
    session.run_frame(&mut host, &mut probe);
    session.run_frame(&mut host, &mut probe);
    assert_eq!(host.rates, vec![NTSC_HZ, PAL_HZ]);
    assert_eq!(host.geometries.last().map(|g| g.height), Some(568));
    assert!(!session.negotiator().state().fake_ntsc);
}

#[test]
fn test_flicker_is_pinned_to_ntsc_through_session() {
    let mut session = Session::new(&SessionConfig::default());
    let mut host = Host::default();
    let mut probe = ProbeMachine::oscillating();

    // Two reports: 59.4106 Hz labeled PAL, then back to 49.9201 Hz.
    for _ in 0..2 * OSCILLATION_PERIOD + 1 {
        session.run_frame(&mut host, &mut probe);
    }
    assert_eq!(host.rates, vec![NTSC_HZ]);
    assert!(session.negotiator().state().fake_ntsc);
    assert_eq!(host.geometries.last().map(|g| g.height), Some(480));

    for _ in 0..4 * OSCILLATION_PERIOD {
        session.run_frame(&mut host, &mut probe);
    }
    assert_eq!(host.rates, vec![NTSC_HZ]);
}
