//! Configuration schema definitions.
//!
//! Every section carries `#[serde(default)]` so a config file only needs the
//! keys it wants to change.

use super::error::{ConfigError, ConfigResult};
use crate::port::{PortConfiguration, DEFAULT_BAUD_RATE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Adapter connection settings
    pub device: DeviceConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Reject values that would make the device unusable.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.device.baud_rate == 0 {
            return Err(ConfigError::validation(
                "device.baud_rate",
                "must be greater than zero",
            ));
        }
        if self.device.bitrate == 0 {
            return Err(ConfigError::validation(
                "device.bitrate",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// `[device]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Serial port of the adapter (e.g. "/dev/ttyACM0" or "COM3")
    pub port: Option<String>,
    /// Serial baud rate of the USB link
    pub baud_rate: u32,
    /// CAN bus bitrate sent with `S<rate>` before opening the bus
    pub bitrate: u32,
    /// Short names for ports
    #[serde(default)]
    pub port_aliases: HashMap<String, String>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud_rate: DEFAULT_BAUD_RATE,
            bitrate: 500_000,
            port_aliases: HashMap::new(),
        }
    }
}

impl DeviceConfig {
    /// Resolve a port name through aliases
    pub fn resolve_port(&self, name: &str) -> String {
        self.port_aliases
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    /// Transport settings derived from this section.
    pub fn port_configuration(&self) -> PortConfiguration {
        PortConfiguration::with_baud_rate(self.baud_rate)
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error", or a full
    /// `tracing_subscriber::EnvFilter` directive
    pub level: String,
    /// Log format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON lines
    Json,
    /// Multi-line human readable output
    #[default]
    Pretty,
    /// Single-line output
    Compact,
}
