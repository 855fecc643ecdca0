//! Video standard bits and the geometry derived from them.

use std::ops::BitOr;

/// PAL vertical refresh in Hz.
pub const PAL_HZ: f64 = 49.9201;
/// NTSC vertical refresh in Hz.
pub const NTSC_HZ: f64 = 59.8251;

/// Largest geometry a host must be prepared for.
pub const MAX_WIDTH: u32 = 1024;
pub const MAX_HEIGHT: u32 = 1024;

/// Geometry declared before any standard has been derived.
pub const DEFAULT_WIDTH: u32 = 720;
pub const DEFAULT_HEIGHT: u32 = 568;

/// Audio sample rate declared alongside the video timing.
pub const SAMPLE_RATE: f64 = 44100.0;

/// NTSC pixels are narrower than PAL ones.
const NTSC_ASPECT_CORRECTION: f32 = 44.0 / 52.0;

/// {PAL | NTSC} × {low-res | hi-res}, stored as bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StandardBits(u8);

impl StandardBits {
    pub const PAL: Self = Self(0x01);
    pub const NTSC: Self = Self(0x02);
    pub const HIRES: Self = Self(0x04);

    pub const PAL_HIRES: Self = Self(Self::PAL.0 | Self::HIRES.0);
    pub const NTSC_HIRES: Self = Self(Self::NTSC.0 | Self::HIRES.0);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0x07)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn is_ntsc(self) -> bool {
        self.contains(Self::NTSC)
    }

    pub fn is_hires(self) -> bool {
        self.contains(Self::HIRES)
    }

    /// Swap the PAL/NTSC bit to match `ntsc`, leaving the hi-res bit alone.
    /// Bits carrying neither standard are returned unchanged.
    pub fn with_standard(self, ntsc: bool) -> Self {
        if ntsc && self.contains(Self::PAL) {
            self.without(Self::PAL) | Self::NTSC
        } else if !ntsc && self.contains(Self::NTSC) {
            self.without(Self::NTSC) | Self::PAL
        } else {
            self
        }
    }

    /// Region the bits declare.
    pub fn standard(self) -> VideoStandard {
        if self.is_ntsc() {
            VideoStandard::Ntsc
        } else {
            VideoStandard::Pal
        }
    }
}

impl BitOr for StandardBits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Broadcast standard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VideoStandard {
    #[default]
    Pal,
    Ntsc,
}

impl VideoStandard {
    pub fn nominal_hz(self) -> f64 {
        match self {
            Self::Pal => PAL_HZ,
            Self::Ntsc => NTSC_HZ,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Pal => "PAL",
            Self::Ntsc => "NTSC",
        }
    }
}

/// Geometry and nominal timing declared to the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: f32,
    pub frame_rate: f64,
}

impl Geometry {
    fn new(width: u32, height: u32, standard: VideoStandard) -> Self {
        let mut aspect_ratio = width as f32 / height as f32;
        if standard == VideoStandard::Ntsc {
            aspect_ratio *= NTSC_ASPECT_CORRECTION;
        }
        Self {
            width,
            height,
            aspect_ratio,
            frame_rate: standard.nominal_hz(),
        }
    }

    /// Geometry for a standard/resolution combination.
    ///
    /// Only the hi-res combinations define one; for anything else the caller
    /// keeps whatever it derived last.
    pub fn for_bits(bits: StandardBits) -> Option<Self> {
        match bits {
            StandardBits::PAL_HIRES => Some(Self::new(720, 568, VideoStandard::Pal)),
            StandardBits::NTSC_HIRES => Some(Self::new(720, 480, VideoStandard::Ntsc)),
            _ => None,
        }
    }

    /// Geometry in effect before anything has been derived.
    pub fn fallback(standard: VideoStandard) -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, standard)
    }
}

/// Everything the host needs for its initial audio/video negotiation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AvInfo {
    pub geometry: Geometry,
    pub max_width: u32,
    pub max_height: u32,
    pub fps: f64,
    pub sample_rate: f64,
}

/// Startup video configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VideoConfig {
    pub standard: VideoStandard,
    pub hires: bool,
    /// Whether the host's frame rate may be changed at runtime.
    pub allow_hz_change: bool,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            standard: VideoStandard::Pal,
            hires: true,
            allow_hz_change: true,
        }
    }
}

impl VideoConfig {
    pub fn bits(&self) -> StandardBits {
        let standard = match self.standard {
            VideoStandard::Pal => StandardBits::PAL,
            VideoStandard::Ntsc => StandardBits::NTSC,
        };
        if self.hires {
            standard | StandardBits::HIRES
        } else {
            standard
        }
    }
}
