pub mod negotiator;
pub mod standard;

pub use negotiator::{ANTI_OSCILLATION_HZ, AvOutcome, AvRequest, Negotiator, VideoStandardState};
pub use standard::{AvInfo, Geometry, StandardBits, VideoConfig, VideoStandard};
