pub mod probe;
pub mod registry;

pub use probe::ProbeMachine;
