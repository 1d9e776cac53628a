//! Display backend trait
//!
//! Defines the interface for framebuffer displays.

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::BinaryColor;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Drawing into the framebuffer failed
    Draw,
    /// Display not initialized
    NotInitialized,
}

/// Display backend trait
///
/// A monochrome framebuffer that embedded-graphics draws into, plus a way
/// to push the buffer to the panel.
pub trait DisplayBackend: DrawTarget<Color = BinaryColor> {
    /// Flush buffered content to the display
    fn flush(&mut self) -> Result<(), DisplayError>;
}
