//! Board-agnostic core logic for the digit classifier firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Frame assembly from the serial byte stream
//! - Affine int8 quantization of pixel intensities
//! - Class selection from the network scores
//! - Capability traits for the inference engine and the presenter
//! - State machine and pipeline controller
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod frame;
pub mod messages;
pub mod pipeline;
pub mod quant;
pub mod select;
pub mod state;
pub mod traits;

pub use frame::{FrameAssembler, FRAME_LEN};
pub use pipeline::{Pipeline, Step};
pub use quant::QuantParams;
pub use select::{PredictedClass, NUM_CLASSES};
