use log::{info, warn};
use retroport_core::core::host::joypad;
use retroport_core::core::{AvSink, Device, InputSnapshot, MAX_PORTS, MouseSample, PollSource};
use retroport_core::video::Geometry;
use sdl2::controller::{Axis as PadAxis, GameController};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Scancode;
use sdl2::mouse::MouseUtil;
use sdl2::{EventPump, GameControllerSubsystem};

use crate::input::{ANALOG_THRESHOLD, KeyMap, PAD_BUTTONS, stick_directions};

/// Frontend actions raised by window events and hotkeys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostCommand {
    Quit,
    /// F11: re-read the configuration file.
    Reload,
    /// F12: reset the machine.
    Reset,
    /// Scroll Lock: capture or release the mouse.
    ToggleGrab,
}

/// The SDL side of the session: a [`PollSource`] filled from the keyboard,
/// game controllers and mouse once per frame, and an [`AvSink`] that holds
/// geometry and frame-rate updates until the emulator applies them.
pub struct SdlHost {
    event_pump: EventPump,
    controller_subsystem: GameControllerSubsystem,
    mouse: MouseUtil,
    /// Opened controllers in connection order; controller n drives port n.
    controllers: Vec<GameController>,
    key_map: KeyMap,
    snapshot: InputSnapshot,
    grabbed: bool,
    geometry: Option<Geometry>,
    frame_rate: Option<f64>,
}

impl SdlHost {
    pub fn new(sdl: &sdl2::Sdl, key_map: KeyMap) -> Self {
        let event_pump = sdl.event_pump().expect("Failed to get event pump");
        let controller_subsystem = sdl
            .game_controller()
            .expect("Failed to init SDL game controller subsystem");

        let mut host = Self {
            event_pump,
            controller_subsystem,
            mouse: sdl.mouse(),
            controllers: Vec::new(),
            key_map,
            snapshot: InputSnapshot::new(),
            grabbed: false,
            geometry: None,
            frame_rate: None,
        };
        host.set_grab(true);
        host
    }

    /// Drain pending SDL events: track controller hotplug and collect
    /// frontend commands. Input levels are read in [`PollSource::poll`].
    pub fn pump_events(&mut self) -> Vec<HostCommand> {
        let mut commands = Vec::new();
        let events: Vec<Event> = self.event_pump.poll_iter().collect();

        for event in events {
            match event {
                Event::Quit { .. } => commands.push(HostCommand::Quit),

                Event::KeyDown {
                    scancode: Some(sc),
                    repeat: false,
                    ..
                } => match sc {
                    Scancode::F11 => commands.push(HostCommand::Reload),
                    Scancode::F12 => commands.push(HostCommand::Reset),
                    Scancode::ScrollLock => commands.push(HostCommand::ToggleGrab),
                    _ => {}
                },

                Event::Window {
                    win_event: WindowEvent::FocusLost,
                    ..
                } => self.set_grab(false),

                Event::ControllerDeviceAdded { which, .. } => self.open_controller(which),

                Event::ControllerDeviceRemoved { which, .. } => self.close_controller(which),

                _ => {}
            }
        }
        commands
    }

    pub fn toggle_grab(&mut self) {
        self.set_grab(!self.grabbed);
    }

    fn set_grab(&mut self, grabbed: bool) {
        self.grabbed = grabbed;
        self.mouse.set_relative_mouse_mode(grabbed);
        // Discard motion accumulated while the pointer was free.
        let _ = self.event_pump.relative_mouse_state();
    }

    fn open_controller(&mut self, joystick_index: u32) {
        match self.controller_subsystem.open(joystick_index) {
            Ok(controller) => {
                let id = controller.instance_id();
                if self.controllers.iter().any(|c| c.instance_id() == id) {
                    return;
                }
                info!(
                    "controller {:?} connected on port {}",
                    controller.name(),
                    self.controllers.len() + 1
                );
                self.controllers.push(controller);
            }
            Err(e) => warn!("cannot open controller {joystick_index}: {e}"),
        }
    }

    fn close_controller(&mut self, instance_id: u32) {
        if let Some(index) = self
            .controllers
            .iter()
            .position(|c| c.instance_id() == instance_id)
        {
            let controller = self.controllers.remove(index);
            info!("controller {:?} disconnected", controller.name());
        }
    }

    /// Geometry declared since the last call.
    pub fn take_geometry(&mut self) -> Option<Geometry> {
        self.geometry.take()
    }

    /// Frame rate declared since the last call.
    pub fn take_frame_rate(&mut self) -> Option<f64> {
        self.frame_rate.take()
    }
}

impl PollSource for SdlHost {
    fn poll(&mut self) {
        self.snapshot.clear();

        for scancode in self.event_pump.keyboard_state().pressed_scancodes() {
            if let Some(code) = self.key_map.get(scancode) {
                self.snapshot.set_key(code as usize, true);
            }
        }

        for (port, controller) in self.controllers.iter().take(MAX_PORTS).enumerate() {
            for &(button, id) in PAD_BUTTONS {
                if controller.button(button) {
                    self.snapshot.set_button(port, id, true);
                }
            }
            let x = controller.axis(PadAxis::LeftX);
            let y = controller.axis(PadAxis::LeftY);
            for (id, pressed) in stick_directions(x, y) {
                if pressed {
                    self.snapshot.set_button(port, id, true);
                }
            }
            if controller.axis(PadAxis::TriggerLeft) >= ANALOG_THRESHOLD {
                self.snapshot.set_button(port, joypad::L2, true);
            }
            if controller.axis(PadAxis::TriggerRight) >= ANALOG_THRESHOLD {
                self.snapshot.set_button(port, joypad::R2, true);
            }
        }

        if self.grabbed {
            let state = self.event_pump.relative_mouse_state();
            self.snapshot.set_mouse(MouseSample {
                dx: state.x().clamp(i16::MIN as i32, i16::MAX as i32) as i16,
                dy: state.y().clamp(i16::MIN as i32, i16::MAX as i32) as i16,
                left: state.left(),
                right: state.right(),
                middle: state.middle(),
            });
        }

        self.snapshot.poll();
    }

    fn query(&self, port: usize, device: Device, index: u32, id: u32) -> i16 {
        self.snapshot.query(port, device, index, id)
    }
}

impl AvSink for SdlHost {
    fn set_geometry(&mut self, geometry: &Geometry) {
        self.geometry = Some(*geometry);
    }

    fn set_frame_rate(&mut self, hz: f64) {
        self.frame_rate = Some(hz);
    }
}
