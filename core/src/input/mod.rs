//! Input translation: level-sampled host input to edge events for the
//! emulated machine.
//!
//! Per frame the keyboard is scanned first. Unless the keyboard has taken
//! direct control of the joystick, each controller port is then resolved
//! and the pointer overlay runs.

pub mod controller;
pub mod joypad;
pub mod keyboard;
pub mod keymap;
pub mod latch;
pub mod pointer;

use log::{info, warn};
use thiserror::Error;

use crate::core::host::PollSource;
use crate::core::sink::{DisplaySink, InputSink};
use crate::core::snapshot::MAX_PORTS;
pub use controller::ControllerClass;
use keyboard::KeyEdgeDetector;
use latch::LatchTable;
use pointer::PointerOverlay;

/// Who drives port 0's joystick this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// The alternate key is held: the keyboard has exclusive control and the
    /// controller and pointer overlays are bypassed.
    Direct,
    /// Controllers and the pointer overlay are translated.
    Overlay,
}

/// Controller class per port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortConfig {
    pub classes: [ControllerClass; MAX_PORTS],
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            classes: [
                ControllerClass::Joystick,
                ControllerClass::Joystick,
                ControllerClass::None,
                ControllerClass::None,
            ],
        }
    }
}

/// Rejected port assignment.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PortError {
    #[error("port {0} does not exist")]
    OutOfRange(usize),
    #[error("{class} is not offered on port {}", .port + 1)]
    NotOffered { port: usize, class: ControllerClass },
}

/// Owns every latch table of the translation layer.
pub struct InputLayer {
    keyboard: KeyEdgeDetector,
    classes: [ControllerClass; MAX_PORTS],
    latches: LatchTable,
    pointer: PointerOverlay,
}

impl InputLayer {
    /// Build a layer with the given port classes. Classes not offered on
    /// their port are replaced by [`ControllerClass::None`].
    pub fn new(config: &PortConfig) -> Self {
        let mut classes = [ControllerClass::None; MAX_PORTS];
        for (port, &class) in config.classes.iter().enumerate() {
            if class.offered_on(port) {
                classes[port] = class;
            } else {
                warn!("{class} is not offered on port {}, leaving it unplugged", port + 1);
            }
        }
        Self {
            keyboard: KeyEdgeDetector::new(),
            classes,
            latches: LatchTable::default(),
            pointer: PointerOverlay::new(),
        }
    }

    pub fn mode(&self) -> InputMode {
        self.keyboard.mode()
    }

    pub fn keyboard(&self) -> &KeyEdgeDetector {
        &self.keyboard
    }

    pub fn pointer(&self) -> &PointerOverlay {
        &self.pointer
    }

    pub fn latches(&self) -> &LatchTable {
        &self.latches
    }

    pub fn port_device(&self, port: usize) -> Option<ControllerClass> {
        self.classes.get(port).copied()
    }

    /// Plug a controller class into a port.
    ///
    /// Whatever the port's latches still hold is released first so nothing
    /// stays stuck down on the machine side.
    pub fn set_port_device<S: InputSink + ?Sized>(
        &mut self,
        port: usize,
        class: ControllerClass,
        sink: &mut S,
    ) -> Result<(), PortError> {
        let Some(latches) = self.latches.port_mut(port) else {
            return Err(PortError::OutOfRange(port));
        };
        if !class.offered_on(port) {
            return Err(PortError::NotOffered { port, class });
        }
        if self.classes[port] != class {
            joypad::release_port(port, latches, sink);
            self.classes[port] = class;
            info!("Controller {}: {class}", port + 1);
        }
        Ok(())
    }

    /// Translate one polled frame.
    pub fn process_frame<P, S, D>(&mut self, source: &P, sink: &mut S, display: &mut D)
    where
        P: PollSource + ?Sized,
        S: InputSink + ?Sized,
        D: DisplaySink + ?Sized,
    {
        self.keyboard.process(source, sink, display);

        let mode = self.keyboard.mode();
        for ((port, latches), &class) in self.latches.ports_mut().zip(&self.classes) {
            if class.has_directions() {
                joypad::resolve_directions(mode, port, source, &mut latches.directions, sink);
            }
            joypad::map_buttons(mode, port, class, source, &mut latches.buttons, sink);
        }
        self.pointer.process(mode, source, &mut self.latches, sink);
    }

    /// Three-character status of a port (see [`joypad::port_status`]), or
    /// blanks for a port that does not exist.
    pub fn port_status(&self, port: usize) -> [u8; 3] {
        self.latches.port(port).map_or(*b"   ", joypad::port_status)
    }

    /// Release every key, button and axis the machine was told about.
    pub fn release_all<S: InputSink + ?Sized>(&mut self, sink: &mut S) {
        self.keyboard.release_all(sink);
        for (port, latches) in self.latches.ports_mut() {
            joypad::release_port(port, latches, sink);
        }
        self.pointer.release_all(sink);
    }
}
