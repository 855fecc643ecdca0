pub mod core;
pub mod input;
pub mod scheduler;
pub mod session;
pub mod video;

pub mod prelude {
    pub use crate::core::machine::{Machine, TimingReport};
    pub use crate::core::{
        Axis, AvSink, Device, DisplaySink, EventQueue, InputEvent, InputSink, InputSnapshot,
        PollSource,
    };
    pub use crate::input::{ControllerClass, InputLayer, InputMode, PortConfig, PortError};
    pub use crate::scheduler::{Scheduler, Turn};
    pub use crate::session::{Session, SessionConfig};
    pub use crate::video::{AvRequest, Geometry, Negotiator, VideoConfig, VideoStandard};
}
