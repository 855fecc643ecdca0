mod common;

use common::{CountingDisplay, axis_values};
use retroport_core::core::host::joypad;
use retroport_core::core::{Axis, InputEvent, InputSnapshot};
use retroport_core::input::controller::{self, ControllerClass};
use retroport_core::input::joypad::{map_buttons, port_status, resolve_directions};
use retroport_core::input::keymap::retrok;
use retroport_core::input::latch::{ButtonLatch, DirectionLatch, PortLatches};
use retroport_core::input::{InputLayer, InputMode, PortConfig, PortError};

fn directions(snapshot: &InputSnapshot, latch: &mut DirectionLatch) -> Vec<InputEvent> {
    let mut events = Vec::new();
    resolve_directions(InputMode::Overlay, 0, snapshot, latch, &mut events);
    events
}

fn buttons(class: ControllerClass, snapshot: &InputSnapshot, latch: &mut ButtonLatch) -> Vec<InputEvent> {
    let mut events = Vec::new();
    map_buttons(InputMode::Overlay, 0, class, snapshot, latch, &mut events);
    events
}

fn vertical(value: i8) -> InputEvent {
    InputEvent::AxisDirection {
        port: 0,
        axis: Axis::Vertical,
        value,
    }
}

fn fire(slot: u8, down: bool) -> InputEvent {
    InputEvent::AxisButton { port: 0, slot, down }
}

// ==========================================================================
// Directional conflict resolution
// ==========================================================================

#[test]
fn test_single_direction_sets_and_clears() {
    let mut latch = DirectionLatch::default();
    let mut snapshot = InputSnapshot::new();

    snapshot.set_button(0, joypad::UP, true);
    assert_eq!(directions(&snapshot, &mut latch), vec![vertical(-1)]);
    assert!(latch.up());
    assert!(directions(&snapshot, &mut latch).is_empty());

    snapshot.set_button(0, joypad::UP, false);
    assert_eq!(directions(&snapshot, &mut latch), vec![vertical(0)]);
    assert!(!latch.up());
    assert!(directions(&snapshot, &mut latch).is_empty());
}

#[test]
fn test_opposite_press_freezes_latched_direction() {
    let mut latch = DirectionLatch::default();
    let mut snapshot = InputSnapshot::new();

    snapshot.set_button(0, joypad::UP, true);
    assert_eq!(directions(&snapshot, &mut latch), vec![vertical(-1)]);

    // Down joins: nothing changes, the axis stays at -1.
    snapshot.set_button(0, joypad::DOWN, true);
    for _ in 0..3 {
        assert!(directions(&snapshot, &mut latch).is_empty());
        assert_eq!(latch.vertical.value(), -1);
    }

    // Up leaves while down is held: neutral, then down is fresh.
    snapshot.set_button(0, joypad::UP, false);
    assert_eq!(directions(&snapshot, &mut latch), vec![vertical(0), vertical(1)]);
    assert!(latch.down());
    assert!(!latch.up());
}

#[test]
fn test_direct_reversal_reports_neutral_then_new_direction() {
    let mut latch = DirectionLatch::default();
    let mut snapshot = InputSnapshot::new();

    snapshot.set_button(0, joypad::DOWN, true);
    assert_eq!(directions(&snapshot, &mut latch), vec![vertical(1)]);

    snapshot.set_button(0, joypad::DOWN, false);
    snapshot.set_button(0, joypad::UP, true);
    assert_eq!(directions(&snapshot, &mut latch), vec![vertical(0), vertical(-1)]);
    assert!(latch.up());
    assert!(!latch.down());
}

#[test]
fn test_both_pressed_from_neutral_asserts_nothing() {
    let mut latch = DirectionLatch::default();
    let mut snapshot = InputSnapshot::new();

    snapshot.set_button(0, joypad::LEFT, true);
    snapshot.set_button(0, joypad::RIGHT, true);
    assert!(directions(&snapshot, &mut latch).is_empty());
    assert_eq!(latch.horizontal.value(), 0);

    snapshot.set_button(0, joypad::LEFT, false);
    assert_eq!(
        directions(&snapshot, &mut latch),
        vec![InputEvent::AxisDirection {
            port: 0,
            axis: Axis::Horizontal,
            value: 1
        }]
    );
}

#[test]
fn test_releasing_both_from_frozen_state_goes_neutral_once() {
    let mut latch = DirectionLatch::default();
    let mut snapshot = InputSnapshot::new();

    snapshot.set_button(0, joypad::DOWN, true);
    directions(&snapshot, &mut latch);
    snapshot.set_button(0, joypad::UP, true);
    assert!(directions(&snapshot, &mut latch).is_empty());

    snapshot.set_joypad(0, 0);
    assert_eq!(directions(&snapshot, &mut latch), vec![vertical(0)]);
    assert_eq!(latch, DirectionLatch::default());
}

#[test]
fn test_axes_are_independent() {
    let mut latch = DirectionLatch::default();
    let mut snapshot = InputSnapshot::new();

    snapshot.set_button(0, joypad::UP, true);
    snapshot.set_button(0, joypad::RIGHT, true);
    let events = directions(&snapshot, &mut latch);
    assert_eq!(axis_values(&events, 0, Axis::Vertical), vec![-1]);
    assert_eq!(axis_values(&events, 0, Axis::Horizontal), vec![1]);
    // Vertical is resolved before horizontal.
    assert_eq!(events[0], vertical(-1));
}

#[test]
fn test_direct_mode_skips_resolution() {
    let mut latch = DirectionLatch::default();
    let mut snapshot = InputSnapshot::new();
    snapshot.set_button(0, joypad::UP, true);

    let mut events = Vec::new();
    resolve_directions(InputMode::Direct, 0, &snapshot, &mut latch, &mut events);
    assert!(events.is_empty());
    assert_eq!(latch, DirectionLatch::default());
}

// ==========================================================================
// Button edge mapping
// ==========================================================================

#[test]
fn test_button_press_hold_release() {
    let mut latch = ButtonLatch::default();
    let mut snapshot = InputSnapshot::new();

    snapshot.set_button(0, joypad::B, true);
    assert_eq!(buttons(ControllerClass::Joystick, &snapshot, &mut latch), vec![fire(0, true)]);
    for _ in 0..5 {
        assert!(buttons(ControllerClass::Joystick, &snapshot, &mut latch).is_empty());
    }

    snapshot.set_button(0, joypad::B, false);
    assert_eq!(buttons(ControllerClass::Joystick, &snapshot, &mut latch), vec![fire(0, false)]);
}

#[test]
fn test_joystick_ignores_extended_buttons() {
    let mut latch = ButtonLatch::default();
    let mut snapshot = InputSnapshot::new();

    snapshot.set_button(0, joypad::Y, true);
    snapshot.set_button(0, joypad::START, true);
    assert!(buttons(ControllerClass::Joystick, &snapshot, &mut latch).is_empty());
    assert!(!latch.is_down(joypad::Y));
}

#[test]
fn test_cd32_pad_polls_extended_buttons() {
    let mut latch = ButtonLatch::default();
    let mut snapshot = InputSnapshot::new();

    snapshot.set_button(0, joypad::A, true);
    snapshot.set_button(0, joypad::L, true);
    snapshot.set_button(0, joypad::START, true);
    snapshot.set_button(0, joypad::SELECT, true);
    assert_eq!(
        buttons(ControllerClass::Cd32Pad, &snapshot, &mut latch),
        vec![fire(1, true), fire(4, true), fire(6, true)]
    );
}

#[test]
fn test_virtual_slot_table() {
    assert_eq!(controller::virtual_slot(joypad::B), Some(0));
    assert_eq!(controller::virtual_slot(joypad::A), Some(1));
    assert_eq!(controller::virtual_slot(joypad::START), Some(6));
    assert_eq!(controller::virtual_slot(joypad::SELECT), None);
    assert_eq!(controller::virtual_slot(99), None);
}

#[test]
fn test_button_latch_ignores_out_of_range_ids() {
    let mut latch = ButtonLatch::default();
    assert_eq!(latch.edge(64, true), None);
    assert!(!latch.is_down(64));
}

// ==========================================================================
// Controller classes
// ==========================================================================

#[test]
fn test_class_names_round_trip_case_insensitively() {
    for class in ControllerClass::ALL {
        assert_eq!(ControllerClass::from_name(class.name()), Some(class));
    }
    assert_eq!(ControllerClass::from_name("CD32"), Some(ControllerClass::Cd32Pad));
    assert_eq!(ControllerClass::from_name("gamepad"), None);
}

#[test]
fn test_cd32_only_offered_on_native_ports() {
    assert!(ControllerClass::Cd32Pad.offered_on(0));
    assert!(ControllerClass::Cd32Pad.offered_on(1));
    assert!(!ControllerClass::Cd32Pad.offered_on(2));
    assert!(ControllerClass::Joystick.offered_on(3));
    assert!(!ControllerClass::Joystick.offered_on(4));
}

// ==========================================================================
// Port status
// ==========================================================================

#[test]
fn test_port_status_idle_and_directions() {
    let mut latches = PortLatches::default();
    assert_eq!(&port_status(&latches), b"   ");

    let mut snapshot = InputSnapshot::new();
    snapshot.set_button(0, joypad::UP, true);
    snapshot.set_button(0, joypad::LEFT, true);
    directions(&snapshot, &mut latches.directions);
    assert_eq!(&port_status(&latches), b"<^ ");
}

#[test]
fn test_port_status_fire_buttons_highlighted() {
    let mut latches = PortLatches::default();
    latches.buttons.edge(joypad::B, true);
    assert_eq!(port_status(&latches), [b' ', b'1' | 0x80, b' ']);

    latches.buttons.edge(joypad::A, true);
    assert_eq!(port_status(&latches)[1], b'3' | 0x80);

    latches.buttons.edge(joypad::B, false);
    assert_eq!(port_status(&latches)[1], b'2' | 0x80);
}

// ==========================================================================
// Input layer
// ==========================================================================

#[test]
fn test_default_ports() {
    let layer = InputLayer::new(&PortConfig::default());
    assert_eq!(layer.port_device(0), Some(ControllerClass::Joystick));
    assert_eq!(layer.port_device(1), Some(ControllerClass::Joystick));
    assert_eq!(layer.port_device(2), Some(ControllerClass::None));
    assert_eq!(layer.port_device(3), Some(ControllerClass::None));
    assert_eq!(layer.port_device(4), None);
}

#[test]
fn test_unoffered_class_is_unplugged_at_startup() {
    let mut config = PortConfig::default();
    config.classes[2] = ControllerClass::Cd32Pad;
    let layer = InputLayer::new(&config);
    assert_eq!(layer.port_device(2), Some(ControllerClass::None));
}

#[test]
fn test_set_port_device_rejects_invalid_assignments() {
    let mut layer = InputLayer::new(&PortConfig::default());
    let mut events = Vec::new();

    assert_eq!(
        layer.set_port_device(4, ControllerClass::Joystick, &mut events),
        Err(PortError::OutOfRange(4))
    );
    let err = layer
        .set_port_device(3, ControllerClass::Cd32Pad, &mut events)
        .unwrap_err();
    assert_eq!(
        err,
        PortError::NotOffered {
            port: 3,
            class: ControllerClass::Cd32Pad
        }
    );
    assert_eq!(err.to_string(), "CD32 Pad is not offered on port 4");
    assert_eq!(layer.port_device(3), Some(ControllerClass::None));
}

#[test]
fn test_changing_class_releases_held_input() {
    let mut layer = InputLayer::new(&PortConfig::default());
    let mut display = CountingDisplay::default();
    let mut snapshot = InputSnapshot::new();
    let mut events = Vec::new();

    snapshot.set_button(0, joypad::RIGHT, true);
    snapshot.set_button(0, joypad::B, true);
    layer.process_frame(&snapshot, &mut events, &mut display);
    events.clear();

    layer
        .set_port_device(0, ControllerClass::Cd32Pad, &mut events)
        .unwrap();
    assert_eq!(
        events,
        vec![
            InputEvent::AxisDirection {
                port: 0,
                axis: Axis::Horizontal,
                value: 0
            },
            fire(0, false),
        ]
    );
    assert_eq!(&layer.port_status(0), b"   ");

    // Same class again: nothing to release.
    events.clear();
    layer
        .set_port_device(0, ControllerClass::Cd32Pad, &mut events)
        .unwrap();
    assert!(events.is_empty());
}

#[test]
fn test_unplugged_port_emits_nothing() {
    let mut layer = InputLayer::new(&PortConfig::default());
    let mut display = CountingDisplay::default();
    let mut snapshot = InputSnapshot::new();
    let mut events = Vec::new();

    snapshot.set_button(2, joypad::UP, true);
    snapshot.set_button(2, joypad::B, true);
    layer.process_frame(&snapshot, &mut events, &mut display);
    assert!(events.is_empty());
}

#[test]
fn test_keyboard_class_has_no_directions_or_buttons() {
    let mut config = PortConfig::default();
    config.classes[1] = ControllerClass::Keyboard;
    let mut layer = InputLayer::new(&config);
    let mut display = CountingDisplay::default();
    let mut snapshot = InputSnapshot::new();
    let mut events = Vec::new();

    snapshot.set_button(1, joypad::DOWN, true);
    snapshot.set_button(1, joypad::A, true);
    layer.process_frame(&snapshot, &mut events, &mut display);
    assert!(events.is_empty());
}

#[test]
fn test_alternate_key_bypasses_controllers_and_pointer() {
    let mut layer = InputLayer::new(&PortConfig::default());
    let mut display = CountingDisplay::default();
    let mut snapshot = InputSnapshot::new();
    let mut events = Vec::new();

    snapshot.set_key(retrok::RIGHT_ALT as usize, true);
    snapshot.set_button(0, joypad::UP, true);
    snapshot.set_button(1, joypad::B, true);
    layer.process_frame(&snapshot, &mut events, &mut display);

    assert_eq!(layer.mode(), InputMode::Direct);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], InputEvent::KeyDown(_)));

    // Alternate released: the held controller input is picked up.
    events.clear();
    snapshot.set_key(retrok::RIGHT_ALT as usize, false);
    layer.process_frame(&snapshot, &mut events, &mut display);
    assert_eq!(layer.mode(), InputMode::Overlay);
    assert!(events.contains(&vertical(-1)));
    assert!(events.contains(&InputEvent::AxisButton {
        port: 1,
        slot: 0,
        down: true
    }));
}

#[test]
fn test_release_all_clears_every_port() {
    let mut layer = InputLayer::new(&PortConfig::default());
    let mut display = CountingDisplay::default();
    let mut snapshot = InputSnapshot::new();
    let mut events = Vec::new();

    snapshot.set_button(0, joypad::DOWN, true);
    snapshot.set_button(1, joypad::A, true);
    layer.process_frame(&snapshot, &mut events, &mut display);
    events.clear();

    layer.release_all(&mut events);
    assert!(events.contains(&vertical(0)));
    assert!(events.contains(&InputEvent::AxisButton {
        port: 1,
        slot: 1,
        down: false
    }));
    assert_eq!(&layer.port_status(0), b"   ");
    assert_eq!(&layer.port_status(1), b"   ");
}

#[test]
fn test_missing_port_has_blank_status_and_no_latches() {
    let layer = InputLayer::new(&PortConfig::default());
    assert_eq!(&layer.port_status(4), b"   ");
    assert!(layer.latches().port(3).is_some());
    assert!(layer.latches().port(4).is_none());
}
