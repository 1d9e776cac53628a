//! OLED presenter
//!
//! Layout for a 128x64 monochrome panel:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  status / header (6x10)      │
//! │                              │
//! │            big digit (10x20) │
//! │                              │
//! │ [██████████░░░░░░░░░░░░░░░]  │  progress bar, overlaid on status
//! └──────────────────────────────┘
//! ```
//!
//! Positions are derived from the backend's bounding box, so other panel
//! sizes render sensibly.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use numeral_core::messages::PREDICTION_HEADER;
use numeral_core::traits::Presenter;
use numeral_core::PredictedClass;

use crate::backend::{DisplayBackend, DisplayError};

/// Top-left of status text
const STATUS_ORIGIN: Point = Point::new(10, 14);

/// Top-left of the prediction header
const HEADER_ORIGIN: Point = Point::new(25, 5);

/// Horizontal margin of the progress bar
const BAR_MARGIN: u32 = 4;

/// Progress bar height, including the outline
const BAR_HEIGHT: u32 = 8;

/// Gap between the progress bar and the bottom edge
const BAR_BOTTOM_GAP: u32 = 6;

/// Pipeline presenter drawing on a framebuffer display
pub struct OledPresenter<B> {
    backend: B,
    small: MonoTextStyle<'static, BinaryColor>,
    large: MonoTextStyle<'static, BinaryColor>,
}

impl<B: DisplayBackend> OledPresenter<B> {
    /// Create a presenter over an initialized backend
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            small: MonoTextStyle::new(&FONT_6X10, BinaryColor::On),
            large: MonoTextStyle::new(&FONT_10X20, BinaryColor::On),
        }
    }

    /// Get the backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Give the backend back
    pub fn release(self) -> B {
        self.backend
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.backend
            .clear(BinaryColor::Off)
            .map_err(|_| DisplayError::Draw)
    }

    /// Draw text centered on the panel
    fn draw_centered(
        &mut self,
        text: &str,
        style: MonoTextStyle<'static, BinaryColor>,
    ) -> Result<(), DisplayError> {
        let center = self.backend.bounding_box().center();
        let layout = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(text, center, style, layout)
            .draw(&mut self.backend)
            .map_err(|_| DisplayError::Draw)?;
        Ok(())
    }

    /// Outline and fill area of the progress bar
    fn bar_areas(&self, fraction: f32) -> (Rectangle, Rectangle) {
        let area = self.backend.bounding_box();
        let width = area.size.width.saturating_sub(2 * BAR_MARGIN);
        let top = area.size.height.saturating_sub(BAR_HEIGHT + BAR_BOTTOM_GAP);
        let outline = Rectangle::new(
            area.top_left + Point::new(BAR_MARGIN as i32, top as i32),
            Size::new(width, BAR_HEIGHT),
        );

        let inner_width = width.saturating_sub(2);
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        let filled = (inner_width as f32 * fraction) as u32;
        let fill = Rectangle::new(
            outline.top_left + Point::new(1, 1),
            Size::new(filled, BAR_HEIGHT.saturating_sub(2)),
        );
        (outline, fill)
    }
}

impl<B: DisplayBackend> Presenter for OledPresenter<B> {
    type Error = DisplayError;

    fn show_status(&mut self, text: &str) -> Result<(), DisplayError> {
        self.clear()?;
        Text::with_baseline(text, STATUS_ORIGIN, self.small, Baseline::Top)
            .draw(&mut self.backend)
            .map_err(|_| DisplayError::Draw)?;
        self.backend.flush()
    }

    fn show_progress(&mut self, fraction: f32) -> Result<(), DisplayError> {
        // Overlay only; the status text stays visible
        let (outline, fill) = self.bar_areas(fraction);
        outline
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.backend)
            .map_err(|_| DisplayError::Draw)?;
        fill.into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut self.backend)
            .map_err(|_| DisplayError::Draw)?;
        self.backend.flush()
    }

    fn show_prediction(&mut self, class: PredictedClass) -> Result<(), DisplayError> {
        self.clear()?;

        Text::with_baseline(PREDICTION_HEADER, HEADER_ORIGIN, self.small, Baseline::Top)
            .draw(&mut self.backend)
            .map_err(|_| DisplayError::Draw)?;

        let mut buf = [0u8; 4];
        let digit = class.as_char().encode_utf8(&mut buf);
        self.draw_centered(digit, self.large)?;

        self.backend
            .bounding_box()
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.backend)
            .map_err(|_| DisplayError::Draw)?;

        self.backend.flush()
    }

    fn show_error(&mut self, text: &str) -> Result<(), DisplayError> {
        self.clear()?;
        self.draw_centered(text, self.small)?;
        self.backend.flush()
    }
}
