//! Driver for CANtact USB-to-CAN adapters.
//!
//! The adapter shows up as a serial port and speaks the SLCAN ASCII protocol:
//! one-letter commands terminated by a carriage return.
//!
//! # Modules
//!
//! - `frame`: the in-memory CAN frame
//! - `codec`: frame <-> `t<id><dlc><data>\r` line translation
//! - `command`: bitrate / open / close commands
//! - `device`: a session owning one serial transport
//! - `port`: serial transport abstraction, real and mock
//! - `config`: TOML configuration for the command-line tool
//! - `logging`: tracing subscriber setup
//! - `error`: device-level error type

pub mod codec;
pub mod command;
pub mod config;
pub mod device;
pub mod error;
pub mod frame;
pub mod logging;
pub mod port;

// Re-export commonly used types for convenience
pub use codec::{CodecError, FrameFault};
pub use command::Command;
pub use device::{Device, READ_BUFFER_SIZE};
pub use error::{DeviceError, DeviceResult};
pub use frame::{Frame, MAX_DLC, MAX_ID};
pub use port::{MockSerialPort, PortConfiguration, PortError, SerialPortAdapter, SyncSerialPort};

pub use config::{Config, ConfigError, ConfigLoader, ConfigResult};
