//! Configuration for the `cantact` tool.
//!
//! TOML-based configuration with environment variable overrides.
//!
//! # Configuration Resolution
//!
//! Configuration is loaded from the following locations (in order of priority):
//!
//! 1. `CANTACT_CONFIG` environment variable (explicit path)
//! 2. `./cantact.toml` (current directory)
//! 3. `~/.config/cantact/config.toml` (XDG on Linux/macOS)
//! 4. `%APPDATA%\cantact\config.toml` (Windows)
//! 5. Built-in defaults (no file required)
//!
//! # Environment Overrides
//!
//! - `CANTACT_DEVICE_PORT=/dev/ttyACM0`
//! - `CANTACT_DEVICE_BAUD_RATE=115200`
//! - `CANTACT_DEVICE_BITRATE=250000`
//! - `CANTACT_LOGGING_LEVEL=debug`
//!
//! # Example
//!
//! ```toml
//! [device]
//! port = "/dev/ttyACM0"
//! bitrate = 500000
//!
//! [device.port_aliases]
//! car = "/dev/serial/by-id/usb-CANtact-if00"
//!
//! [logging]
//! level = "debug"
//! format = "compact"
//! ```

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{get_default_config_path, resolve_config_path, ConfigLoader};
pub use schema::{Config, DeviceConfig, LogFormat, LoggingConfig};
