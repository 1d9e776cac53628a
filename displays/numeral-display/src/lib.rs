//! OLED output for the digit classifier
//!
//! This crate provides:
//! - `DisplayBackend` trait for framebuffer displays that can be flushed
//! - `OledPresenter`, the pipeline `Presenter` drawn with embedded-graphics
//! - `Ssd1306` driver for 128x64 I2C OLED panels
//!
//! # Architecture
//!
//! The presenter draws into the backend's framebuffer and flushes once per
//! update. Any `DrawTarget<Color = BinaryColor>` that can flush works as a
//! backend, so the layout is tested on the host against an in-memory panel.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod backend;
pub mod presenter;
pub mod ssd1306;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use presenter::OledPresenter;
pub use ssd1306::Ssd1306;
