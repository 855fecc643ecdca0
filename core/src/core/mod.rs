pub mod host;
pub mod machine;
pub mod sink;
pub mod snapshot;

pub use host::{Device, PollSource};
pub use machine::{Machine, TimingReport};
pub use sink::{Axis, AvSink, DisplaySink, EventQueue, InputEvent, InputSink, RedrawRequest};
pub use snapshot::{InputSnapshot, KEY_SLOTS, MAX_PORTS, MouseSample};
