//! Device-level error type.

use crate::codec::CodecError;
use crate::port::PortError;
use thiserror::Error;

/// Convenient Result type for device operations.
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Errors returned by [`Device`](crate::device::Device) operations.
///
/// Transport failures and protocol failures stay separate so a caller can
/// tell "the cable is gone" from "the device sent something unreadable".
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The serial transport failed; the inner error is passed through as-is.
    #[error(transparent)]
    Transport(#[from] PortError),

    /// A frame could not be encoded, or a received line could not be decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl DeviceError {
    /// Whether the transport, not the protocol, failed.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
