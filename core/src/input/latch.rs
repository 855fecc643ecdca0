//! Latch tables: what the translation layer has already told the machine.
//!
//! Each port owns one [`PortLatches`] entry in a [`LatchTable`]; entries are
//! indexed by port number and, inside, by direction or logical button id.

use crate::core::host::joypad;
use crate::core::sink::Axis;
use crate::core::snapshot::MAX_PORTS;

/// Latched state of one opposing direction pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AxisLatch {
    negative: bool,
    positive: bool,
}

impl AxisLatch {
    pub fn negative(&self) -> bool {
        self.negative
    }

    pub fn positive(&self) -> bool {
        self.positive
    }

    /// Axis value currently asserted: -1, 0 or 1.
    pub fn value(&self) -> i8 {
        if self.negative {
            -1
        } else if self.positive {
            1
        } else {
            0
        }
    }

    /// Apply one frame of direction levels, reporting each transition.
    ///
    /// A direction is set only while its opposite is absent, and cleared
    /// only once it is itself released, so a latched direction stays frozen
    /// while both are held. Clears are applied before sets: at most one
    /// latch is ever set, and a reversal reports neutral then the new
    /// direction.
    pub fn step(&mut self, negative: bool, positive: bool, mut emit: impl FnMut(i8)) {
        if !negative && self.negative {
            self.negative = false;
            emit(0);
        }
        if !positive && self.positive {
            self.positive = false;
            emit(0);
        }

        if negative && !positive && !self.negative {
            self.negative = true;
            emit(-1);
        }
        if positive && !negative && !self.positive {
            self.positive = true;
            emit(1);
        }
    }

    /// Drop both latches, reporting a single neutral if anything was held.
    pub fn release(&mut self, mut emit: impl FnMut(i8)) {
        if self.negative || self.positive {
            *self = Self::default();
            emit(0);
        }
    }
}

/// Up/down and left/right latches of one port.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirectionLatch {
    pub vertical: AxisLatch,
    pub horizontal: AxisLatch,
}

impl DirectionLatch {
    pub fn axis(&self, axis: Axis) -> &AxisLatch {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    pub fn axis_mut(&mut self, axis: Axis) -> &mut AxisLatch {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    pub fn up(&self) -> bool {
        self.vertical.negative
    }

    pub fn down(&self) -> bool {
        self.vertical.positive
    }

    pub fn left(&self) -> bool {
        self.horizontal.negative
    }

    pub fn right(&self) -> bool {
        self.horizontal.positive
    }
}

/// "We told the machine this button is down", per logical button id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonLatch {
    down: [bool; joypad::COUNT],
}

impl ButtonLatch {
    pub fn is_down(&self, id: u32) -> bool {
        self.down.get(id as usize).copied().unwrap_or(false)
    }

    /// Record this frame's level. Returns the new state on a transition,
    /// `None` when nothing changed or the id is out of range.
    pub fn edge(&mut self, id: u32, level: bool) -> Option<bool> {
        let latched = self.down.get_mut(id as usize)?;
        if *latched == level {
            return None;
        }
        *latched = level;
        Some(level)
    }

    /// Ids currently latched down, in ascending order.
    pub fn held(&self) -> impl Iterator<Item = u32> + '_ {
        self.down
            .iter()
            .enumerate()
            .filter(|&(_, &down)| down)
            .map(|(id, _)| id as u32)
    }
}

/// Every latch one port owns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PortLatches {
    pub directions: DirectionLatch,
    pub buttons: ButtonLatch,
}

/// Port-indexed latch arena.
#[derive(Clone, Debug, Default)]
pub struct LatchTable {
    ports: [PortLatches; MAX_PORTS],
}

impl LatchTable {
    pub fn port(&self, port: usize) -> Option<&PortLatches> {
        self.ports.get(port)
    }

    pub fn port_mut(&mut self, port: usize) -> Option<&mut PortLatches> {
        self.ports.get_mut(port)
    }

    /// Every port's latches, in port order.
    pub fn ports_mut(&mut self) -> impl Iterator<Item = (usize, &mut PortLatches)> {
        self.ports.iter_mut().enumerate()
    }
}
