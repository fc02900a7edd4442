//! Device lifecycle commands.

use crate::codec::TERMINATOR;

/// A non-frame command understood by the CANtact firmware.
///
/// The firmware sends no acknowledgement the driver relies on, so sending a
/// command twice simply repeats it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `S<rate>`: configure the bus bitrate in bits per second.
    SetBitrate(u32),
    /// `O`: start receiving and transmitting on the bus.
    Open,
    /// `C`: stop receiving and transmitting on the bus.
    Close,
}

impl Command {
    /// Wire bytes for this command, terminator included.
    pub fn to_bytes(self) -> Vec<u8> {
        let mut out = match self {
            Self::SetBitrate(rate) => format!("S{rate}").into_bytes(),
            Self::Open => vec![b'O'],
            Self::Close => vec![b'C'],
        };
        out.push(TERMINATOR);
        out
    }
}
