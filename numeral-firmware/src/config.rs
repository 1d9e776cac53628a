//! Build-time device configuration
//!
//! `build.rs` validates `classifier.toml` and generates `DEVICE_CONFIG`.

use numeral_core::config::{DeviceConfig, DisplaySettings, PipelineConfig, SerialSettings};

include!(concat!(env!("OUT_DIR"), "/config.rs"));
