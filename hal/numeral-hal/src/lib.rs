//! Numeral Hardware Abstraction Layer
//!
//! This crate defines the serial transport traits that chip-specific code
//! implements. The classifier core only talks to the link through these, so
//! it can be driven by a real UART on the device or by an in-memory fake on
//! the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  numeral-core (pipeline controller)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  numeral-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  numeral-firmware (embassy-rp UART)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication

#![no_std]
#![deny(unsafe_code)]

pub mod uart;

// Re-export key traits at crate root for convenience
pub use uart::{Uart, UartRx, UartTx};
