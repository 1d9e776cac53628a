//! Presenter trait
//!
//! Renders pipeline status for the operator. The controller decides what to
//! show and when; implementations only draw.

use crate::select::PredictedClass;

/// Trait for status output (OLED, LEDs, log sink)
pub trait Presenter {
    /// Error type for rendering operations
    type Error;

    /// Replace the screen with status text
    ///
    /// `text` may contain `\n` to break lines.
    fn show_status(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Update the progress indicator
    ///
    /// - `fraction`: received share of the frame, `0.0..=1.0`
    fn show_progress(&mut self, fraction: f32) -> Result<(), Self::Error>;

    /// Show the final prediction
    fn show_prediction(&mut self, class: PredictedClass) -> Result<(), Self::Error>;

    /// Replace the screen with an error message
    fn show_error(&mut self, text: &str) -> Result<(), Self::Error>;
}
