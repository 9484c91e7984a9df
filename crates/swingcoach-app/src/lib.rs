// Request lifecycle: the state machine and the controller that drives it.

pub mod controller;
pub mod lifecycle;

pub use controller::{run, AnalysisOutcome, Controller};
pub use lifecycle::{transition, LifecycleEvent, TransitionError};
