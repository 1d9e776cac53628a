//! Configuration type definitions
//!
//! These types describe the classifier device. All fields are plain numbers
//! so a validated configuration can be emitted as a `const` by the firmware
//! build script.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default progress redraw interval in accepted bytes
pub const DEFAULT_PROGRESS_INTERVAL: u16 = 100;

/// Default serial poll timeout in microseconds
pub const DEFAULT_READ_TIMEOUT_US: u32 = 100;

/// Default delay before engine init, gives the host time to open the port
pub const DEFAULT_BOOT_DELAY_MS: u32 = 2000;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Serial poll timeout of zero would turn the poll loop into a busy spin
    ZeroReadTimeout,
    /// Serial baud rate must be non-zero
    ZeroBaudrate,
    /// I2C address outside the 7-bit range
    BadI2cAddress(u8),
    /// I2C clock must be non-zero
    ZeroI2cFrequency,
}

/// Pipeline controller settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PipelineConfig {
    /// Show a progress update every this many accepted bytes (0 disables)
    pub progress_interval: u16,
    /// Maximum wait for one serial byte per poll iteration (µs)
    pub read_timeout_us: u32,
    /// Delay between the boot screen and engine init (ms)
    pub boot_delay_ms: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            read_timeout_us: DEFAULT_READ_TIMEOUT_US,
            boot_delay_ms: DEFAULT_BOOT_DELAY_MS,
        }
    }
}

impl PipelineConfig {
    /// Check the settings for values the controller cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.read_timeout_us == 0 {
            return Err(ConfigError::ZeroReadTimeout);
        }
        Ok(())
    }

    /// Whether a progress update is due after `received` accepted bytes
    pub fn progress_due(&self, received: usize) -> bool {
        self.progress_interval != 0 && received % self.progress_interval as usize == 0
    }
}

/// Serial link settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SerialSettings {
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self { baudrate: 115_200 }
    }
}

/// OLED display settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplaySettings {
    /// 7-bit I2C address of the controller (typically 0x3C or 0x3D)
    pub i2c_address: u8,
    /// I2C clock frequency in Hz
    pub i2c_frequency: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            i2c_address: 0x3C,
            i2c_frequency: 400_000, // Fast mode
        }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeviceConfig {
    pub serial: SerialSettings,
    pub display: DisplaySettings,
    pub pipeline: PipelineConfig,
}

impl DeviceConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.serial.baudrate == 0 {
            return Err(ConfigError::ZeroBaudrate);
        }
        if self.display.i2c_address > 0x7F {
            return Err(ConfigError::BadI2cAddress(self.display.i2c_address));
        }
        if self.display.i2c_frequency == 0 {
            return Err(ConfigError::ZeroI2cFrequency);
        }
        self.pipeline.validate()
    }
}
