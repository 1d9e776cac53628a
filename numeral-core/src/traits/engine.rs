//! Inference engine trait
//!
//! The engine owns the input and output tensors. Callers write the quantized
//! image straight into [`InferenceEngine::input_mut`] and read scores from
//! [`InferenceEngine::output`]; nothing is copied in between.

/// Errors during one-time engine setup
///
/// All of these are fatal; the device needs a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineInitError {
    /// Runtime reported a non-zero status
    Backend(i32),
    /// Input tensor does not hold one frame
    InputShape { expected: usize, actual: usize },
    /// Output tensor does not hold one score per class
    OutputShape { expected: usize, actual: usize },
    /// Input scale is not a positive finite number
    InvalidScale,
}

/// Errors from a single forward pass
///
/// Recoverable; the current frame is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InferenceError {
    /// Runtime reported a non-zero status
    Backend(i32),
    /// Quantized frame could not be written to the input view
    InputWrite,
    /// Output view was empty after the forward pass
    EmptyOutput,
}

/// Trait for the quantized network runtime
pub trait InferenceEngine {
    /// One-time setup, must run before any other method
    fn init(&mut self) -> Result<(), EngineInitError>;

    /// Exclusive write access to the input tensor storage
    fn input_mut(&mut self) -> &mut [i8];

    /// Read access to the output tensor storage
    fn output(&self) -> &[i8];

    /// Input quantization scale
    fn input_scale(&self) -> f32;

    /// Input quantization zero point
    fn input_zero_point(&self) -> i32;

    /// Run the forward pass on whatever is in the input view
    ///
    /// Blocking and bounded; overwrites the output view.
    fn invoke(&mut self) -> Result<(), InferenceError>;
}
