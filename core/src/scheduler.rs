//! Host/machine turn taking.
//!
//! The host and the emulated machine never run at the same time. Control
//! passes between them through [`Scheduler::handoff`] only; a frame is one
//! host turn followed by one machine turn.

/// Whose turn it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    /// Polling, translation and AV negotiation.
    Host,
    /// The machine advances one frame.
    Machine,
}

#[derive(Debug)]
pub struct Scheduler {
    turn: Turn,
    frames: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            turn: Turn::Host,
            frames: 0,
        }
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Completed frames (machine turns handed back to the host).
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Pass control to the other side and return the new turn.
    pub fn handoff(&mut self) -> Turn {
        self.turn = match self.turn {
            Turn::Host => Turn::Machine,
            Turn::Machine => {
                self.frames += 1;
                Turn::Host
            }
        };
        self.turn
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
