//! SLCAN frame codec.
//!
//! Translates between [`Frame`] and the CANtact's ASCII frame line:
//!
//! ```text
//! t 123 2 ABCD \r
//! │  │  │  │   └ terminator
//! │  │  │  └ dlc × 2 hex digits of payload
//! │  │  └ dlc, one decimal digit
//! │  └ identifier, three hex digits
//! └ tag
//! ```
//!
//! Both directions validate before touching a field: encode refuses frames
//! the fixed-width fields cannot carry, and decode checks the remaining
//! length before every extraction so a short read is an error rather than a
//! silently zero-filled frame.

mod error;

pub use error::{CodecError, FrameFault};

use crate::frame::{Frame, MAX_DLC, MAX_ID};

/// Leading byte of a standard data frame line.
pub const FRAME_TAG: u8 = b't';

/// Line terminator used for every command and frame.
pub const TERMINATOR: u8 = b'\r';

/// Tag, three identifier digits and the dlc digit.
const HEADER_LEN: usize = 5;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Exact encoded length of a frame line with the given dlc, terminator
/// included.
pub const fn encoded_len(dlc: u8) -> usize {
    HEADER_LEN + 2 * dlc as usize + 1
}

/// Encode `frame` into a freshly allocated line.
///
/// # Example
/// ```
/// use cantact::{codec, Frame};
///
/// let frame = Frame::new(0x123, &[0xAB, 0xCD])?;
/// assert_eq!(codec::encode(&frame)?, b"t1232ABCD\r");
/// # Ok::<(), cantact::CodecError>(())
/// ```
pub fn encode(frame: &Frame) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::with_capacity(encoded_len(MAX_DLC));
    encode_into(frame, &mut out)?;
    Ok(out)
}

/// Append the encoded line for `frame` to `out`.
///
/// On error nothing is appended.
pub fn encode_into(frame: &Frame, out: &mut Vec<u8>) -> Result<(), CodecError> {
    validate(frame)?;

    out.reserve(encoded_len(frame.dlc));
    out.push(FRAME_TAG);
    push_hex(out, u32::from(frame.id), 3);
    out.push(b'0' + frame.dlc);
    for &byte in frame.data() {
        push_hex(out, u32::from(byte), 2);
    }
    out.push(TERMINATOR);
    Ok(())
}

/// Decode one frame line from the bytes returned by a transport read.
///
/// Anything after the payload (the terminator, or leftovers from a larger
/// read buffer) is ignored.
pub fn decode(buf: &[u8]) -> Result<Frame, CodecError> {
    match buf.first() {
        Some(&FRAME_TAG) => {}
        other => return Err(CodecError::UnrecognizedFrameTag(other.copied())),
    }

    let id_digits = buf
        .get(1..4)
        .ok_or(CodecError::InvalidFrame(FrameFault::MalformedIdentifier))?;
    let mut id = 0u16;
    for &digit in id_digits {
        let nibble =
            hex_value(digit).ok_or(CodecError::InvalidFrame(FrameFault::MalformedIdentifier))?;
        id = (id << 4) | u16::from(nibble);
    }

    let dlc = match buf.get(4) {
        Some(d) if d.is_ascii_digit() => d - b'0',
        _ => return Err(CodecError::InvalidFrame(FrameFault::MalformedDlc)),
    };
    if dlc > MAX_DLC {
        return Err(CodecError::InvalidFrame(FrameFault::DlcOutOfRange(dlc)));
    }

    let expected = 2 * usize::from(dlc);
    let payload = &buf[HEADER_LEN..];
    let found = payload
        .iter()
        .take(expected)
        .take_while(|b| hex_value(**b).is_some())
        .count();
    if found < expected {
        return Err(CodecError::MalformedPayload { expected, found });
    }

    let mut data = [0u8; 8];
    for (slot, pair) in data.iter_mut().zip(payload[..expected].chunks_exact(2)) {
        // Both digits were checked above.
        let hi = hex_value(pair[0]).unwrap_or_default();
        let lo = hex_value(pair[1]).unwrap_or_default();
        *slot = (hi << 4) | lo;
    }

    Ok(Frame { id, dlc, data })
}

fn validate(frame: &Frame) -> Result<(), CodecError> {
    if frame.id > MAX_ID {
        return Err(CodecError::InvalidFrame(FrameFault::IdentifierOutOfRange(
            u32::from(frame.id),
        )));
    }
    if frame.dlc > MAX_DLC {
        return Err(CodecError::InvalidFrame(FrameFault::DlcOutOfRange(frame.dlc)));
    }
    Ok(())
}

/// Push `value` as exactly `width` uppercase hex digits.
fn push_hex(out: &mut Vec<u8>, value: u32, width: u32) {
    for shift in (0..width).rev() {
        out.push(HEX_DIGITS[((value >> (shift * 4)) & 0xF) as usize]);
    }
}

pub(crate) fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        _ => None,
    }
}
