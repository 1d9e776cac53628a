//! State machine definition
//!
//! All pipeline behavior is a function of the current state and an event.

use super::events::Event;
use crate::traits::EngineInitError;

/// Pipeline states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Power-on, engine not yet initialized
    Init,
    /// Idle between frames
    WaitingForData,
    /// Receiving the bytes of a frame
    Collecting,
    /// Quantizing and running the network
    Processing,
    /// Engine init failed; parked until a physical reset
    FatalError(EngineInitError),
}

impl State {
    /// Check if this state accepts serial bytes
    pub fn accepts_bytes(&self) -> bool {
        matches!(self, State::WaitingForData | State::Collecting)
    }

    /// Check if this is the fatal state
    pub fn is_fatal(&self) -> bool {
        matches!(self, State::FatalError(_))
    }

    /// Process an event and return the next state
    ///
    /// This is the core state transition logic.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // Init transitions
            (Init, EngineReady) => WaitingForData,
            (Init, EngineFailed(e)) => FatalError(e),

            // WaitingForData transitions
            (WaitingForData, ByteReceived) => Collecting,

            // Collecting transitions
            (Collecting, ByteReceived) => Collecting,
            (Collecting, FrameComplete) => Processing,
            (Collecting, FrameDiscarded) => WaitingForData,

            // Processing transitions
            (Processing, InferenceSucceeded) => WaitingForData,
            (Processing, InferenceFailed) => WaitingForData,

            // FatalError is terminal; everything else stays put
            _ => self,
        }
    }
}
