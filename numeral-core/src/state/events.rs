//! Events that trigger state transitions

use crate::traits::EngineInitError;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Lifecycle events
    /// Engine initialized and validated
    EngineReady,
    /// Engine init or validation failed
    EngineFailed(EngineInitError),

    // Link events
    /// A byte arrived from the serial link
    ByteReceived,
    /// The frame assembler reached a full frame
    FrameComplete,
    /// The frame assembler refused a byte; the partial frame is dropped
    FrameDiscarded,

    // Inference events
    /// Forward pass succeeded and a class was reported
    InferenceSucceeded,
    /// Forward pass failed; frame discarded
    InferenceFailed,
}
