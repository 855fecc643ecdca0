//! Decides when a video standard change is surfaced to the host as a
//! geometry and/or frame-rate update.
//!
//! Some programs reprogram the chipset to ~60 Hz while it still reports
//! PAL, then flip back and forth between 49.92 Hz and 59.41 Hz.
//!
//! The first PAL-labeled signal faster than [`ANTI_OSCILLATION_HZ`] pins the
//! declared standard to NTSC; later flips are not surfaced.

use log::{debug, info};

use super::standard::{
    AvInfo, Geometry, MAX_HEIGHT, MAX_WIDTH, SAMPLE_RATE, StandardBits, VideoConfig,
    VideoStandard,
};
use crate::core::sink::AvSink;

/// A PAL-labeled signal faster than this is declared NTSC.
pub const ANTI_OSCILLATION_HZ: f64 = 55.0;

/// Which parts of the host's AV declaration a caller wants refreshed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AvRequest {
    pub geometry: bool,
    pub timing: bool,
}

impl AvRequest {
    pub const GEOMETRY: Self = Self {
        geometry: true,
        timing: false,
    };
    pub const TIMING: Self = Self {
        geometry: false,
        timing: true,
    };
    pub const BOTH: Self = Self {
        geometry: true,
        timing: true,
    };
}

/// What one negotiation pushed to the host.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AvOutcome {
    pub geometry: Option<Geometry>,
    pub frame_rate: Option<f64>,
}

/// Persistent video standard state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VideoStandardState {
    pub current: StandardBits,
    pub previous: StandardBits,
    /// Once set, the declared standard stays NTSC.
    pub fake_ntsc: bool,
    pub allow_hz_change: bool,
}

impl VideoStandardState {
    fn new(config: &VideoConfig) -> Self {
        let bits = config.bits();
        Self {
            current: bits,
            previous: bits,
            fake_ntsc: false,
            allow_hz_change: config.allow_hz_change,
        }
    }
}

/// Owns the video standard state and the last geometry derived from it.
pub struct Negotiator {
    state: VideoStandardState,
    geometry: Geometry,
    last_pushed: Option<Geometry>,
}

impl Negotiator {
    pub fn new(config: &VideoConfig) -> Self {
        let state = VideoStandardState::new(config);
        let geometry = Geometry::for_bits(state.current)
            .unwrap_or_else(|| Geometry::fallback(state.current.standard()));
        Self {
            state,
            geometry,
            last_pushed: None,
        }
    }

    /// Re-initialize from a reloaded configuration. This is the only way the
    /// state, including the NTSC pin, is ever reset.
    pub fn reload(&mut self, config: &VideoConfig) {
        *self = Self::new(config);
        info!(
            "video config reloaded: {:?}, hz change {}",
            self.state.current,
            if config.allow_hz_change { "allowed" } else { "locked" }
        );
    }

    pub fn state(&self) -> &VideoStandardState {
        &self.state
    }

    /// Geometry last derived (not necessarily pushed).
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn region(&self) -> VideoStandard {
        self.state.current.standard()
    }

    pub fn system_av_info(&self) -> AvInfo {
        AvInfo {
            geometry: self.geometry,
            max_width: MAX_WIDTH,
            max_height: MAX_HEIGHT,
            fps: self.region().nominal_hz(),
            sample_rate: SAMPLE_RATE,
        }
    }

    /// Negotiate one update.
    ///
    /// `detected_ntsc` is the machine's own label for its signal and
    /// `observed_hz` its measured refresh. Geometry and frame rate pushes are
    /// independent; either, both or neither may happen.
    pub fn update<S: AvSink + ?Sized>(
        &mut self,
        request: AvRequest,
        detected_ntsc: bool,
        observed_hz: f64,
        sink: &mut S,
    ) -> AvOutcome {
        debug!(
            "trying to update AV geometry:{} timing:{} to ntsc:{} hz:{:.4} from {:?}",
            request.geometry, request.timing, detected_ntsc, observed_hz, self.state.current
        );

        let snapshot = self.state.current;
        self.state.previous = snapshot;
        let mut change_timing = request.timing;
        let mut suppressed = false;

        if change_timing && !self.state.fake_ntsc {
            self.state.current = self.state.current.with_standard(detected_ntsc);
        }

        if change_timing && self.state.current == snapshot {
            if !detected_ntsc && observed_hz > ANTI_OSCILLATION_HZ {
                self.state.current = self.state.current.without(StandardBits::PAL) | StandardBits::NTSC;
                if !self.state.fake_ntsc {
                    info!("{observed_hz:.4} Hz signal labeled PAL, pinning to NTSC");
                }
                self.state.fake_ntsc = true;
            }
            if self.state.current == snapshot {
                info!("already at wanted AV");
                change_timing = false;
                suppressed = true;
            }
        }

        match Geometry::for_bits(self.state.current) {
            Some(geometry) => self.geometry = geometry,
            None => debug!(
                "no geometry defined for {:?}, keeping {}x{}",
                self.state.current, self.geometry.width, self.geometry.height
            ),
        }

        if change_timing && !self.state.allow_hz_change {
            debug!("frame rate change not allowed");
            change_timing = false;
        }

        let mut outcome = AvOutcome::default();

        if change_timing {
            let hz = self.region().nominal_hz();
            info!("update timing: {hz:.4} Hz, {:?}", self.state.current);
            sink.set_frame_rate(hz);
            outcome.frame_rate = Some(hz);
        }

        // A timing request that changed nothing does not re-push the geometry
        // the host already has.
        let redundant = suppressed && self.last_pushed == Some(self.geometry);
        if request.geometry && !redundant {
            let geometry = self.geometry;
            info!(
                "update geometry: {}x{} aspect {:.4}, {:?}",
                geometry.width, geometry.height, geometry.aspect_ratio, self.state.current
            );
            sink.set_geometry(&geometry);
            self.last_pushed = Some(geometry);
            outcome.geometry = Some(geometry);
        }

        outcome
    }
}
