//! Core traits for the serial transport.
//!
//! `SerialPortAdapter` is the only capability the driver needs from the
//! outside world: blocking byte writes and blocking reads into a buffer.
//! Real hardware and the in-memory mock both implement it.

use super::error::PortError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Baud rate the CANtact firmware expects on its USB CDC interface.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Configuration parameters for opening a serial port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortConfiguration {
    /// Baud rate (bits per second).
    pub baud_rate: u32,

    /// How long a single read waits inside the OS before the adapter retries.
    ///
    /// This is a polling granularity, not a read deadline: reads still block
    /// until data arrives.
    pub poll_interval: Duration,
}

impl Default for PortConfiguration {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            poll_interval: Duration::from_millis(500),
        }
    }
}

impl PortConfiguration {
    /// Default configuration with a different baud rate.
    pub fn with_baud_rate(baud_rate: u32) -> Self {
        Self {
            baud_rate,
            ..Self::default()
        }
    }
}

/// Trait for blocking serial I/O.
///
/// Implementations are not expected to be shared between threads; the
/// device session takes exclusive ownership of one.
pub trait SerialPortAdapter: Send + std::fmt::Debug {
    /// Write the whole of `data` to the port.
    ///
    /// Returns the number of bytes written.
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, PortError>;

    /// Block until at least one byte is available, then read into `buffer`.
    ///
    /// Returns the number of bytes actually read.
    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, PortError>;

    /// Get the name/path of this serial port.
    fn name(&self) -> &str;
}
