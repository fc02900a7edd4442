//! Transport error types.
//!
//! Everything that can go wrong below the SLCAN protocol layer ends up here.
//! The device session hands these back to callers untouched.

use thiserror::Error;

/// Errors raised by the serial transport.
#[derive(Debug, Error)]
pub enum PortError {
    /// The named serial port does not exist on this system.
    #[error("Serial port not found: {0}")]
    NotFound(String),

    /// An I/O error occurred while reading or writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The port rejected its configuration (bad baud rate, bad name, ...).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A serialport-specific error occurred.
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),
}

impl PortError {
    /// Create a NotFound error from a port name.
    pub fn not_found(port_name: impl Into<String>) -> Self {
        Self::NotFound(port_name.into())
    }

    /// Create a Config error from a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error means the device went away rather than a one-off
    /// glitch.
    pub fn is_disconnect(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::BrokenPipe
                    | std::io::ErrorKind::NotConnected
                    | std::io::ErrorKind::UnexpectedEof
            ),
            Self::Serial(e) => e.kind() == serialport::ErrorKind::NoDevice,
            Self::Config(_) => false,
        }
    }
}
