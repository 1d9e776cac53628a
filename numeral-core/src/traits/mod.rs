//! Capability traits
//!
//! These traits define the boundary between the pipeline controller and
//! its external collaborators: the inference runtime and whatever renders
//! status for the operator.

pub mod engine;
pub mod presenter;

pub use engine::{EngineInitError, InferenceEngine, InferenceError};
pub use presenter::Presenter;
