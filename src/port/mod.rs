//! Serial transport layer.
//!
//! Provides the `SerialPortAdapter` capability trait, a real implementation
//! over the `serialport` crate, and an in-memory mock for tests.

pub mod error;
pub mod mock;
pub mod sync_port;
pub mod traits;

pub use error::PortError;
pub use mock::MockSerialPort;
pub use sync_port::SyncSerialPort;
pub use traits::*;
