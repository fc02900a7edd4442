//! CANtact device session.
//!
//! A [`Device`] owns one serial transport for its whole life and speaks the
//! SLCAN line protocol over it. Every call blocks on the transport; the
//! `&mut self` receivers mean only one operation can be in flight.
//!
//! # Example
//! ```no_run
//! use cantact::{Device, Frame};
//!
//! let mut device = Device::connect("/dev/ttyACM0")?;
//! device.set_bitrate(500_000)?;
//! device.open()?;
//! device.write_frame(&Frame::new(0x123, &[0xAB, 0xCD])?)?;
//! let frame = device.read_frame()?;
//! println!("{frame}");
//! device.close()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::codec;
use crate::command::Command;
use crate::error::DeviceResult;
use crate::frame::Frame;
use crate::port::{PortConfiguration, SerialPortAdapter, SyncSerialPort};
use tracing::{debug, trace, warn};

/// Size of the buffer each [`Device::read_frame`] call reads into.
pub const READ_BUFFER_SIZE: usize = 128;

/// A session with one CANtact adapter.
#[derive(Debug)]
pub struct Device<P: SerialPortAdapter = SyncSerialPort> {
    port: P,
}

impl Device<SyncSerialPort> {
    /// Open the named serial port at 115200 baud and wrap it.
    pub fn connect(port_name: &str) -> DeviceResult<Self> {
        Self::connect_with(port_name, PortConfiguration::default())
    }

    /// Open the named serial port with an explicit configuration.
    pub fn connect_with(port_name: &str, config: PortConfiguration) -> DeviceResult<Self> {
        debug!(port = port_name, baud = config.baud_rate, "opening serial port");
        let port = SyncSerialPort::open(port_name, config)?;
        Ok(Self::new(port))
    }
}

impl<P: SerialPortAdapter> Device<P> {
    /// Wrap an already-open transport.
    pub fn new(port: P) -> Self {
        Self { port }
    }

    /// Send `S<rate>`. The device's reply, if any, is not awaited.
    pub fn set_bitrate(&mut self, rate: u32) -> DeviceResult<()> {
        self.send_command(Command::SetBitrate(rate))
    }

    /// Send `O`, enabling bus reception and transmission.
    pub fn open(&mut self) -> DeviceResult<()> {
        self.send_command(Command::Open)
    }

    /// Send `C`, disabling bus reception and transmission.
    pub fn close(&mut self) -> DeviceResult<()> {
        self.send_command(Command::Close)
    }

    /// Encode `frame` and write it to the device.
    ///
    /// A frame the wire format cannot carry is rejected before anything is
    /// written.
    pub fn write_frame(&mut self, frame: &Frame) -> DeviceResult<()> {
        let line = codec::encode(frame)?;
        trace!(port = self.port.name(), %frame, "tx");
        self.port.write_bytes(&line)?;
        Ok(())
    }

    /// Block until the device delivers data, then decode one frame from it.
    pub fn read_frame(&mut self) -> DeviceResult<Frame> {
        let mut buffer = [0u8; READ_BUFFER_SIZE];
        let n = self.port.read_bytes(&mut buffer)?;

        match codec::decode(&buffer[..n]) {
            Ok(frame) => {
                trace!(port = self.port.name(), %frame, "rx");
                Ok(frame)
            }
            Err(e) => {
                warn!(
                    port = self.port.name(),
                    line = %String::from_utf8_lossy(&buffer[..n]).escape_debug(),
                    "undecodable line: {e}"
                );
                Err(e.into())
            }
        }
    }

    /// Borrow the underlying transport.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Mutably borrow the underlying transport.
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Give up the session and return the transport.
    pub fn into_inner(self) -> P {
        self.port
    }

    fn send_command(&mut self, command: Command) -> DeviceResult<()> {
        debug!(port = self.port.name(), ?command, "sending command");
        self.port.write_bytes(&command.to_bytes())?;
        Ok(())
    }
}
