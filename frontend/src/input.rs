use std::collections::HashMap;

use retroport_core::core::host::joypad;
use retroport_core::input::keymap::retrok;
use sdl2::controller::Button;
use sdl2::keyboard::Scancode;

/// Maps SDL scancodes to host key codes (RETROK numbering).
pub struct KeyMap {
    map: HashMap<Scancode, u16>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Bind a scancode to a host key code.
    pub fn bind(&mut self, scancode: Scancode, code: u16) {
        self.map.insert(scancode, code);
    }

    /// Look up the host key code for a scancode.
    pub fn get(&self, scancode: Scancode) -> Option<u16> {
        self.map.get(&scancode).copied()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

const DEFAULT_KEYS: &[(Scancode, u16)] = &[
    (Scancode::A, retrok::A),
    (Scancode::B, retrok::B),
    (Scancode::C, retrok::C),
    (Scancode::D, retrok::D),
    (Scancode::E, retrok::E),
    (Scancode::F, retrok::F),
    (Scancode::G, retrok::G),
    (Scancode::H, retrok::H),
    (Scancode::I, retrok::I),
    (Scancode::J, retrok::J),
    (Scancode::K, retrok::K),
    (Scancode::L, retrok::L),
    (Scancode::M, retrok::M),
    (Scancode::N, retrok::N),
    (Scancode::O, retrok::O),
    (Scancode::P, retrok::P),
    (Scancode::Q, retrok::Q),
    (Scancode::R, retrok::R),
    (Scancode::S, retrok::S),
    (Scancode::T, retrok::T),
    (Scancode::U, retrok::U),
    (Scancode::V, retrok::V),
    (Scancode::W, retrok::W),
    (Scancode::X, retrok::X),
    (Scancode::Y, retrok::Y),
    (Scancode::Z, retrok::Z),
    (Scancode::Num1, retrok::NUM_1),
    (Scancode::Num2, retrok::NUM_2),
    (Scancode::Num3, retrok::NUM_3),
    (Scancode::Num4, retrok::NUM_4),
    (Scancode::Num5, retrok::NUM_5),
    (Scancode::Num6, retrok::NUM_6),
    (Scancode::Num7, retrok::NUM_7),
    (Scancode::Num8, retrok::NUM_8),
    (Scancode::Num9, retrok::NUM_9),
    (Scancode::Num0, retrok::NUM_0),
    (Scancode::Return, retrok::RETURN),
    (Scancode::Escape, retrok::ESCAPE),
    (Scancode::Backspace, retrok::BACKSPACE),
    (Scancode::Tab, retrok::TAB),
    (Scancode::Space, retrok::SPACE),
    (Scancode::Minus, retrok::MINUS),
    (Scancode::Equals, retrok::EQUALS),
    (Scancode::LeftBracket, retrok::LEFT_BRACKET),
    (Scancode::RightBracket, retrok::RIGHT_BRACKET),
    (Scancode::Backslash, retrok::BACKSLASH),
    (Scancode::NonUsBackslash, retrok::LESS),
    (Scancode::Semicolon, retrok::SEMICOLON),
    (Scancode::Apostrophe, retrok::QUOTE),
    (Scancode::Grave, retrok::BACKQUOTE),
    (Scancode::Comma, retrok::COMMA),
    (Scancode::Period, retrok::PERIOD),
    (Scancode::Slash, retrok::SLASH),
    (Scancode::CapsLock, retrok::CAPS_LOCK),
    (Scancode::F1, retrok::F1),
    (Scancode::F2, retrok::F2),
    (Scancode::F3, retrok::F3),
    (Scancode::F4, retrok::F4),
    (Scancode::F5, retrok::F5),
    (Scancode::F6, retrok::F6),
    (Scancode::F7, retrok::F7),
    (Scancode::F8, retrok::F8),
    (Scancode::F9, retrok::F9),
    (Scancode::F10, retrok::F10),
    (Scancode::Insert, retrok::INSERT),
    (Scancode::Help, retrok::HELP),
    (Scancode::Delete, retrok::DELETE),
    (Scancode::Up, retrok::UP),
    (Scancode::Down, retrok::DOWN),
    (Scancode::Left, retrok::LEFT),
    (Scancode::Right, retrok::RIGHT),
    (Scancode::Kp0, retrok::KP_0),
    (Scancode::Kp1, retrok::KP_1),
    (Scancode::Kp2, retrok::KP_2),
    (Scancode::Kp3, retrok::KP_3),
    (Scancode::Kp4, retrok::KP_4),
    (Scancode::Kp5, retrok::KP_5),
    (Scancode::Kp6, retrok::KP_6),
    (Scancode::Kp7, retrok::KP_7),
    (Scancode::Kp8, retrok::KP_8),
    (Scancode::Kp9, retrok::KP_9),
    (Scancode::KpPeriod, retrok::KP_PERIOD),
    (Scancode::KpDivide, retrok::KP_DIVIDE),
    (Scancode::KpMultiply, retrok::KP_MULTIPLY),
    (Scancode::KpMinus, retrok::KP_MINUS),
    (Scancode::KpPlus, retrok::KP_PLUS),
    (Scancode::KpEnter, retrok::KP_ENTER),
    (Scancode::LShift, retrok::LEFT_SHIFT),
    (Scancode::RShift, retrok::RIGHT_SHIFT),
    (Scancode::LCtrl, retrok::LEFT_CTRL),
    (Scancode::RCtrl, retrok::RIGHT_CTRL),
    (Scancode::LAlt, retrok::LEFT_ALT),
    (Scancode::RAlt, retrok::RIGHT_ALT),
    (Scancode::LGui, retrok::LEFT_SUPER),
    (Scancode::RGui, retrok::RIGHT_SUPER),
];

/// Build the default key map: every physical key the Amiga keyboard has a
/// counterpart for. F11, F12 and Scroll Lock stay free for frontend hotkeys.
pub fn default_key_map() -> KeyMap {
    let mut km = KeyMap::new();
    for &(scancode, code) in DEFAULT_KEYS {
        km.bind(scancode, code);
    }
    km
}

/// Game controller buttons by RetroPad position, not label: the bottom face
/// button is RetroPad B.
pub const PAD_BUTTONS: &[(Button, u32)] = &[
    (Button::A, joypad::B),
    (Button::B, joypad::A),
    (Button::X, joypad::Y),
    (Button::Y, joypad::X),
    (Button::Back, joypad::SELECT),
    (Button::Start, joypad::START),
    (Button::LeftShoulder, joypad::L),
    (Button::RightShoulder, joypad::R),
    (Button::LeftStick, joypad::L3),
    (Button::RightStick, joypad::R3),
    (Button::DPadUp, joypad::UP),
    (Button::DPadDown, joypad::DOWN),
    (Button::DPadLeft, joypad::LEFT),
    (Button::DPadRight, joypad::RIGHT),
];

/// Analog deflection past which a stick or trigger counts as pressed.
pub const ANALOG_THRESHOLD: i16 = 16384;

/// Digital directions read off the left stick, as (RetroPad id, pressed).
pub fn stick_directions(x: i16, y: i16) -> [(u32, bool); 4] {
    [
        (joypad::LEFT, x <= -ANALOG_THRESHOLD),
        (joypad::RIGHT, x >= ANALOG_THRESHOLD),
        (joypad::UP, y <= -ANALOG_THRESHOLD),
        (joypad::DOWN, y >= ANALOG_THRESHOLD),
    ]
}
