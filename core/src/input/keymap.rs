//! Host key codes to Amiga raw key codes.
//!
//! Host codes follow the RETROK numbering (printable keys use their ASCII
//! value, the rest start at 256). The table covers the first
//! [`POLLED_KEYS`] codes; everything else has no mapping.

/// Number of host key codes scanned every frame.
pub const POLLED_KEYS: usize = 320;

/// Host key codes (RETROK numbering).
pub mod retrok {
    pub const BACKSPACE: u16 = 8;
    pub const TAB: u16 = 9;
    pub const RETURN: u16 = 13;
    pub const ESCAPE: u16 = 27;
    pub const SPACE: u16 = 32;
    pub const QUOTE: u16 = 39;
    pub const COMMA: u16 = 44;
    pub const MINUS: u16 = 45;
    pub const PERIOD: u16 = 46;
    pub const SLASH: u16 = 47;
    pub const NUM_0: u16 = 48;
    pub const NUM_1: u16 = 49;
    pub const NUM_2: u16 = 50;
    pub const NUM_3: u16 = 51;
    pub const NUM_4: u16 = 52;
    pub const NUM_5: u16 = 53;
    pub const NUM_6: u16 = 54;
    pub const NUM_7: u16 = 55;
    pub const NUM_8: u16 = 56;
    pub const NUM_9: u16 = 57;
    pub const SEMICOLON: u16 = 59;
    pub const LESS: u16 = 60;
    pub const EQUALS: u16 = 61;
    pub const LEFT_BRACKET: u16 = 91;
    pub const BACKSLASH: u16 = 92;
    pub const RIGHT_BRACKET: u16 = 93;
    pub const BACKQUOTE: u16 = 96;
    pub const A: u16 = 97;
    pub const B: u16 = 98;
    pub const C: u16 = 99;
    pub const D: u16 = 100;
    pub const E: u16 = 101;
    pub const F: u16 = 102;
    pub const G: u16 = 103;
    pub const H: u16 = 104;
    pub const I: u16 = 105;
    pub const J: u16 = 106;
    pub const K: u16 = 107;
    pub const L: u16 = 108;
    pub const M: u16 = 109;
    pub const N: u16 = 110;
    pub const O: u16 = 111;
    pub const P: u16 = 112;
    pub const Q: u16 = 113;
    pub const R: u16 = 114;
    pub const S: u16 = 115;
    pub const T: u16 = 116;
    pub const U: u16 = 117;
    pub const V: u16 = 118;
    pub const W: u16 = 119;
    pub const X: u16 = 120;
    pub const Y: u16 = 121;
    pub const Z: u16 = 122;
    pub const DELETE: u16 = 127;
    pub const KP_0: u16 = 256;
    pub const KP_1: u16 = 257;
    pub const KP_2: u16 = 258;
    pub const KP_3: u16 = 259;
    pub const KP_4: u16 = 260;
    pub const KP_5: u16 = 261;
    pub const KP_6: u16 = 262;
    pub const KP_7: u16 = 263;
    pub const KP_8: u16 = 264;
    pub const KP_9: u16 = 265;
    pub const KP_PERIOD: u16 = 266;
    pub const KP_DIVIDE: u16 = 267;
    pub const KP_MULTIPLY: u16 = 268;
    pub const KP_MINUS: u16 = 269;
    pub const KP_PLUS: u16 = 270;
    pub const KP_ENTER: u16 = 271;
    pub const UP: u16 = 273;
    pub const DOWN: u16 = 274;
    pub const RIGHT: u16 = 275;
    pub const LEFT: u16 = 276;
    pub const INSERT: u16 = 277;
    pub const HOME: u16 = 278;
    pub const END: u16 = 279;
    pub const PAGE_UP: u16 = 280;
    pub const PAGE_DOWN: u16 = 281;
    pub const F1: u16 = 282;
    pub const F2: u16 = 283;
    pub const F3: u16 = 284;
    pub const F4: u16 = 285;
    pub const F5: u16 = 286;
    pub const F6: u16 = 287;
    pub const F7: u16 = 288;
    pub const F8: u16 = 289;
    pub const F9: u16 = 290;
    pub const F10: u16 = 291;
    pub const F11: u16 = 292;
    pub const F12: u16 = 293;
    pub const CAPS_LOCK: u16 = 301;
    pub const RIGHT_SHIFT: u16 = 303;
    pub const LEFT_SHIFT: u16 = 304;
    pub const RIGHT_CTRL: u16 = 305;
    pub const LEFT_CTRL: u16 = 306;
    pub const RIGHT_ALT: u16 = 307;
    pub const LEFT_ALT: u16 = 308;
    pub const RIGHT_META: u16 = 309;
    pub const LEFT_META: u16 = 310;
    pub const LEFT_SUPER: u16 = 311;
    pub const RIGHT_SUPER: u16 = 312;
    pub const HELP: u16 = 315;
}

/// Amiga raw key codes.
pub mod amiga {
    pub const BACKQUOTE: u8 = 0x00;
    pub const NUM_1: u8 = 0x01;
    pub const NUM_2: u8 = 0x02;
    pub const NUM_3: u8 = 0x03;
    pub const NUM_4: u8 = 0x04;
    pub const NUM_5: u8 = 0x05;
    pub const NUM_6: u8 = 0x06;
    pub const NUM_7: u8 = 0x07;
    pub const NUM_8: u8 = 0x08;
    pub const NUM_9: u8 = 0x09;
    pub const NUM_0: u8 = 0x0A;
    pub const MINUS: u8 = 0x0B;
    pub const EQUALS: u8 = 0x0C;
    pub const BACKSLASH: u8 = 0x0D;
    pub const KP_0: u8 = 0x0F;
    pub const Q: u8 = 0x10;
    pub const W: u8 = 0x11;
    pub const E: u8 = 0x12;
    pub const R: u8 = 0x13;
    pub const T: u8 = 0x14;
    pub const Y: u8 = 0x15;
    pub const U: u8 = 0x16;
    pub const I: u8 = 0x17;
    pub const O: u8 = 0x18;
    pub const P: u8 = 0x19;
    pub const LEFT_BRACKET: u8 = 0x1A;
    pub const RIGHT_BRACKET: u8 = 0x1B;
    pub const KP_1: u8 = 0x1D;
    pub const KP_2: u8 = 0x1E;
    pub const KP_3: u8 = 0x1F;
    pub const A: u8 = 0x20;
    pub const S: u8 = 0x21;
    pub const D: u8 = 0x22;
    pub const F: u8 = 0x23;
    pub const G: u8 = 0x24;
    pub const H: u8 = 0x25;
    pub const J: u8 = 0x26;
    pub const K: u8 = 0x27;
    pub const L: u8 = 0x28;
    pub const SEMICOLON: u8 = 0x29;
    pub const QUOTE: u8 = 0x2A;
    pub const KP_4: u8 = 0x2D;
    pub const KP_5: u8 = 0x2E;
    pub const KP_6: u8 = 0x2F;
    pub const LESS_GREATER: u8 = 0x30;
    pub const Z: u8 = 0x31;
    pub const X: u8 = 0x32;
    pub const C: u8 = 0x33;
    pub const V: u8 = 0x34;
    pub const B: u8 = 0x35;
    pub const N: u8 = 0x36;
    pub const M: u8 = 0x37;
    pub const COMMA: u8 = 0x38;
    pub const PERIOD: u8 = 0x39;
    pub const SLASH: u8 = 0x3A;
    pub const KP_PERIOD: u8 = 0x3C;
    pub const KP_7: u8 = 0x3D;
    pub const KP_8: u8 = 0x3E;
    pub const KP_9: u8 = 0x3F;
    pub const SPACE: u8 = 0x40;
    pub const BACKSPACE: u8 = 0x41;
    pub const TAB: u8 = 0x42;
    pub const KP_ENTER: u8 = 0x43;
    pub const RETURN: u8 = 0x44;
    pub const ESCAPE: u8 = 0x45;
    pub const DELETE: u8 = 0x46;
    pub const KP_MINUS: u8 = 0x4A;
    pub const UP: u8 = 0x4C;
    pub const DOWN: u8 = 0x4D;
    pub const RIGHT: u8 = 0x4E;
    pub const LEFT: u8 = 0x4F;
    pub const F1: u8 = 0x50;
    pub const F2: u8 = 0x51;
    pub const F3: u8 = 0x52;
    pub const F4: u8 = 0x53;
    pub const F5: u8 = 0x54;
    pub const F6: u8 = 0x55;
    pub const F7: u8 = 0x56;
    pub const F8: u8 = 0x57;
    pub const F9: u8 = 0x58;
    pub const F10: u8 = 0x59;
    pub const KP_DIVIDE: u8 = 0x5C;
    pub const KP_MULTIPLY: u8 = 0x5D;
    pub const KP_PLUS: u8 = 0x5E;
    pub const HELP: u8 = 0x5F;
    pub const LEFT_SHIFT: u8 = 0x60;
    pub const RIGHT_SHIFT: u8 = 0x61;
    pub const CAPS_LOCK: u8 = 0x62;
    pub const CTRL: u8 = 0x63;
    pub const LEFT_ALT: u8 = 0x64;
    pub const RIGHT_ALT: u8 = 0x65;
    pub const LEFT_AMIGA: u8 = 0x66;
    pub const RIGHT_AMIGA: u8 = 0x67;
}

const PAIRS: &[(u16, u8)] = &[
    (retrok::BACKQUOTE, amiga::BACKQUOTE),
    (retrok::NUM_1, amiga::NUM_1),
    (retrok::NUM_2, amiga::NUM_2),
    (retrok::NUM_3, amiga::NUM_3),
    (retrok::NUM_4, amiga::NUM_4),
    (retrok::NUM_5, amiga::NUM_5),
    (retrok::NUM_6, amiga::NUM_6),
    (retrok::NUM_7, amiga::NUM_7),
    (retrok::NUM_8, amiga::NUM_8),
    (retrok::NUM_9, amiga::NUM_9),
    (retrok::NUM_0, amiga::NUM_0),
    (retrok::MINUS, amiga::MINUS),
    (retrok::EQUALS, amiga::EQUALS),
    (retrok::BACKSLASH, amiga::BACKSLASH),
    (retrok::BACKSPACE, amiga::BACKSPACE),
    (retrok::TAB, amiga::TAB),
    (retrok::Q, amiga::Q),
    (retrok::W, amiga::W),
    (retrok::E, amiga::E),
    (retrok::R, amiga::R),
    (retrok::T, amiga::T),
    (retrok::Y, amiga::Y),
    (retrok::U, amiga::U),
    (retrok::I, amiga::I),
    (retrok::O, amiga::O),
    (retrok::P, amiga::P),
    (retrok::LEFT_BRACKET, amiga::LEFT_BRACKET),
    (retrok::RIGHT_BRACKET, amiga::RIGHT_BRACKET),
    (retrok::RETURN, amiga::RETURN),
    (retrok::A, amiga::A),
    (retrok::S, amiga::S),
    (retrok::D, amiga::D),
    (retrok::F, amiga::F),
    (retrok::G, amiga::G),
    (retrok::H, amiga::H),
    (retrok::J, amiga::J),
    (retrok::K, amiga::K),
    (retrok::L, amiga::L),
    (retrok::SEMICOLON, amiga::SEMICOLON),
    (retrok::QUOTE, amiga::QUOTE),
    (retrok::LESS, amiga::LESS_GREATER),
    (retrok::Z, amiga::Z),
    (retrok::X, amiga::X),
    (retrok::C, amiga::C),
    (retrok::V, amiga::V),
    (retrok::B, amiga::B),
    (retrok::N, amiga::N),
    (retrok::M, amiga::M),
    (retrok::COMMA, amiga::COMMA),
    (retrok::PERIOD, amiga::PERIOD),
    (retrok::SLASH, amiga::SLASH),
    (retrok::SPACE, amiga::SPACE),
    (retrok::ESCAPE, amiga::ESCAPE),
    (retrok::DELETE, amiga::DELETE),
    (retrok::F1, amiga::F1),
    (retrok::F2, amiga::F2),
    (retrok::F3, amiga::F3),
    (retrok::F4, amiga::F4),
    (retrok::F5, amiga::F5),
    (retrok::F6, amiga::F6),
    (retrok::F7, amiga::F7),
    (retrok::F8, amiga::F8),
    (retrok::F9, amiga::F9),
    (retrok::F10, amiga::F10),
    (retrok::UP, amiga::UP),
    (retrok::DOWN, amiga::DOWN),
    (retrok::RIGHT, amiga::RIGHT),
    (retrok::LEFT, amiga::LEFT),
    (retrok::KP_0, amiga::KP_0),
    (retrok::KP_1, amiga::KP_1),
    (retrok::KP_2, amiga::KP_2),
    (retrok::KP_3, amiga::KP_3),
    (retrok::KP_4, amiga::KP_4),
    (retrok::KP_5, amiga::KP_5),
    (retrok::KP_6, amiga::KP_6),
    (retrok::KP_7, amiga::KP_7),
    (retrok::KP_8, amiga::KP_8),
    (retrok::KP_9, amiga::KP_9),
    (retrok::KP_PERIOD, amiga::KP_PERIOD),
    (retrok::KP_DIVIDE, amiga::KP_DIVIDE),
    (retrok::KP_MULTIPLY, amiga::KP_MULTIPLY),
    (retrok::KP_MINUS, amiga::KP_MINUS),
    (retrok::KP_PLUS, amiga::KP_PLUS),
    (retrok::KP_ENTER, amiga::KP_ENTER),
    (retrok::HELP, amiga::HELP),
    (retrok::INSERT, amiga::HELP),
    (retrok::CAPS_LOCK, amiga::CAPS_LOCK),
    (retrok::LEFT_SHIFT, amiga::LEFT_SHIFT),
    (retrok::RIGHT_SHIFT, amiga::RIGHT_SHIFT),
    (retrok::LEFT_CTRL, amiga::CTRL),
    (retrok::RIGHT_CTRL, amiga::CTRL),
    (retrok::LEFT_ALT, amiga::LEFT_ALT),
    (retrok::RIGHT_ALT, amiga::RIGHT_ALT),
    (retrok::LEFT_META, amiga::LEFT_AMIGA),
    (retrok::LEFT_SUPER, amiga::LEFT_AMIGA),
    (retrok::RIGHT_META, amiga::RIGHT_AMIGA),
    (retrok::RIGHT_SUPER, amiga::RIGHT_AMIGA),
];

const TRANSLATION: [Option<u8>; POLLED_KEYS] = {
    let mut table = [None; POLLED_KEYS];
    let mut i = 0;
    while i < PAIRS.len() {
        let (host, code) = PAIRS[i];
        table[host as usize] = Some(code);
        i += 1;
    }
    table
};

/// Amiga code the host's left shift translates to; used for the
/// synthetic shift of the shift lock.
pub const SHIFT_CODE: u8 = match TRANSLATION[retrok::LEFT_SHIFT as usize] {
    Some(code) => code,
    None => amiga::LEFT_SHIFT,
};

/// Translate a host key code. Codes without an Amiga counterpart, and codes
/// outside the scanned range, return `None`.
pub fn translate(host_code: usize) -> Option<u8> {
    TRANSLATION.get(host_code).copied().flatten()
}
