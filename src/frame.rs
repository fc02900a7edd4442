//! CAN frame representation.

use crate::codec::{hex_value, CodecError, FrameFault};
use std::fmt;
use std::str::FromStr;

/// Largest identifier the 3-digit hex field can carry.
pub const MAX_ID: u16 = 0xFFF;

/// Largest data length code of a classic CAN frame.
pub const MAX_DLC: u8 = 8;

/// A single standard CAN data frame.
///
/// The fields are public so any frame can be built, including ones the wire
/// format cannot carry; [`codec::encode`](crate::codec::encode) rejects
/// those. [`Frame::new`] validates up front.
///
/// Two frames compare equal when `id`, `dlc` and the first `dlc` payload
/// bytes match. Bytes past `dlc` carry no meaning.
#[derive(Debug, Clone, Copy, Default)]
pub struct Frame {
    /// Identifier, `0..=0xFFF` on the wire.
    pub id: u16,
    /// Number of valid bytes in `data`, `0..=8`.
    pub dlc: u8,
    /// Payload; only the first `dlc` bytes are meaningful.
    pub data: [u8; 8],
}

impl Frame {
    /// Build a frame from an identifier and up to eight payload bytes.
    pub fn new(id: u16, data: &[u8]) -> Result<Self, CodecError> {
        if id > MAX_ID {
            return Err(CodecError::InvalidFrame(FrameFault::IdentifierOutOfRange(
                u32::from(id),
            )));
        }
        if data.len() > usize::from(MAX_DLC) {
            let dlc = u8::try_from(data.len()).unwrap_or(u8::MAX);
            return Err(CodecError::InvalidFrame(FrameFault::DlcOutOfRange(dlc)));
        }

        let mut frame = Self {
            id,
            dlc: data.len() as u8,
            data: [0; 8],
        };
        frame.data[..data.len()].copy_from_slice(data);
        Ok(frame)
    }

    /// The valid part of the payload.
    ///
    /// A `dlc` above 8 is clamped to the buffer size.
    pub fn data(&self) -> &[u8] {
        &self.data[..usize::from(self.dlc.min(MAX_DLC))]
    }
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.dlc == other.dlc && self.data() == other.data()
    }
}

impl Eq for Frame {}

/// candump-style rendering: `123   [2]  AB CD`.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03X}   [{}] ", self.id, self.dlc)?;
        for byte in self.data() {
            write!(f, " {byte:02X}")?;
        }
        Ok(())
    }
}

/// Parses cansend syntax: `<id>#<hex bytes>`, e.g. `123#ABCD` or `7FF#`.
/// Dots between bytes (`123#AB.CD`) are accepted.
impl FromStr for Frame {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id_text, data_text) = s
            .trim()
            .split_once('#')
            .ok_or(CodecError::InvalidFrame(FrameFault::MissingSeparator))?;

        if id_text.is_empty() || !id_text.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CodecError::InvalidFrame(FrameFault::MalformedIdentifier));
        }
        let id = u32::from_str_radix(id_text, 16)
            .map_err(|_| CodecError::InvalidFrame(FrameFault::MalformedIdentifier))?;
        let id = u16::try_from(id)
            .ok()
            .filter(|id| *id <= MAX_ID)
            .ok_or(CodecError::InvalidFrame(FrameFault::IdentifierOutOfRange(id)))?;

        let digits: Vec<u8> = data_text.bytes().filter(|b| *b != b'.').collect();
        let valid = digits.iter().take_while(|b| hex_value(**b).is_some()).count();
        if valid != digits.len() || digits.len() % 2 != 0 {
            return Err(CodecError::MalformedPayload {
                expected: digits.len().next_multiple_of(2),
                found: valid,
            });
        }

        let bytes: Vec<u8> = digits
            .chunks_exact(2)
            .filter_map(|pair| Some((hex_value(pair[0])? << 4) | hex_value(pair[1])?))
            .collect();
        Frame::new(id, &bytes)
    }
}
