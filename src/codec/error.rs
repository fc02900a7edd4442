//! Codec error types.

use thiserror::Error;

/// Which part of a frame header was out of range or unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFault {
    /// Identifier does not fit in the 3-digit hex field.
    IdentifierOutOfRange(u32),
    /// Data length code above 8.
    DlcOutOfRange(u8),
    /// Identifier field missing or not hexadecimal.
    MalformedIdentifier,
    /// DLC field missing or not a decimal digit.
    MalformedDlc,
    /// Text form without the `#` between identifier and payload.
    MissingSeparator,
}

impl std::fmt::Display for FrameFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdentifierOutOfRange(id) => {
                write!(f, "identifier 0x{id:X} exceeds 0x{:X}", crate::frame::MAX_ID)
            }
            Self::DlcOutOfRange(dlc) => {
                write!(f, "dlc {dlc} exceeds {}", crate::frame::MAX_DLC)
            }
            Self::MalformedIdentifier => write!(f, "identifier is not three hex digits"),
            Self::MalformedDlc => write!(f, "dlc is not a decimal digit"),
            Self::MissingSeparator => write!(f, "expected '#' between identifier and data"),
        }
    }
}

/// Errors produced while encoding or decoding an SLCAN frame line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Identifier or dlc outside what the wire format can carry.
    #[error("Invalid frame: {0}")]
    InvalidFrame(FrameFault),

    /// The line does not start with the `t` frame tag.
    ///
    /// Holds the tag byte that was found, or `None` for an empty buffer.
    #[error("Unrecognized frame tag: {}", describe_tag(.0))]
    UnrecognizedFrameTag(Option<u8>),

    /// Fewer payload hex digits than the dlc promises.
    #[error("Malformed payload: expected {expected} hex digits, found {found}")]
    MalformedPayload { expected: usize, found: usize },
}

fn describe_tag(tag: &Option<u8>) -> String {
    match tag {
        Some(b) if b.is_ascii_graphic() => format!("'{}'", *b as char),
        Some(b) => format!("0x{b:02X}"),
        None => "empty buffer".to_string(),
    }
}
