//! State machine for the classification cycle
//!
//! Defines the authoritative runtime behavior of the pipeline.
//! Transitions are a pure function of state and event.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::State;
