//! Controller classes a port can be assigned, and the logical-to-virtual
//! button table.

use crate::core::host::joypad;
use crate::core::snapshot::MAX_PORTS;

/// Device plugged into a virtual controller port.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ControllerClass {
    RetroPad,
    Cd32Pad,
    #[default]
    Joystick,
    Keyboard,
    None,
}

/// RetroPad buttons and the virtual button slot each one drives.
const BUTTON_SLOTS: &[(u32, u8)] = &[
    (joypad::B, 0),
    (joypad::A, 1),
    (joypad::Y, 2),
    (joypad::X, 3),
    (joypad::L, 4),
    (joypad::R, 5),
    (joypad::START, 6),
];

const TWO_BUTTONS: &[u32] = &[joypad::B, joypad::A];
const CD32_BUTTONS: &[u32] = &[
    joypad::B,
    joypad::A,
    joypad::Y,
    joypad::X,
    joypad::L,
    joypad::R,
    joypad::START,
];

/// Virtual button slot for a RetroPad button id, if it has one.
pub fn virtual_slot(id: u32) -> Option<u8> {
    BUTTON_SLOTS
        .iter()
        .find(|&&(button, _)| button == id)
        .map(|&(_, slot)| slot)
}

impl ControllerClass {
    pub const ALL: [ControllerClass; 5] = [
        Self::RetroPad,
        Self::Cd32Pad,
        Self::Joystick,
        Self::Keyboard,
        Self::None,
    ];

    /// Configuration name (e.g. "cd32").
    pub fn name(self) -> &'static str {
        match self {
            Self::RetroPad => "retropad",
            Self::Cd32Pad => "cd32",
            Self::Joystick => "joystick",
            Self::Keyboard => "keyboard",
            Self::None => "none",
        }
    }

    /// Human-readable name for logs and listings.
    pub fn description(self) -> &'static str {
        match self {
            Self::RetroPad => "RetroPad",
            Self::Cd32Pad => "CD32 Pad",
            Self::Joystick => "Joystick",
            Self::Keyboard => "Keyboard",
            Self::None => "Unplugged",
        }
    }

    /// Look up a class by configuration name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|class| class.name().eq_ignore_ascii_case(name))
    }

    /// Whether the class carries a digital direction pad.
    pub fn has_directions(self) -> bool {
        matches!(self, Self::RetroPad | Self::Cd32Pad | Self::Joystick)
    }

    /// Logical button ids polled for this class, in polling order.
    pub fn buttons(self) -> &'static [u32] {
        match self {
            Self::RetroPad | Self::Joystick => TWO_BUTTONS,
            Self::Cd32Pad => CD32_BUTTONS,
            Self::Keyboard | Self::None => &[],
        }
    }

    /// Whether the class can be plugged into `port` (0-based).
    /// The CD32 pad only exists on the two native joystick ports.
    pub fn offered_on(self, port: usize) -> bool {
        match self {
            Self::Cd32Pad => port < 2,
            _ => port < MAX_PORTS,
        }
    }
}

impl std::fmt::Display for ControllerClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}
