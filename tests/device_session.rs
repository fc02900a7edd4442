//! End-to-end device session tests against the mock transport.

mod common;

use cantact::{CodecError, Device, DeviceError, FrameFault, PortError, SerialPortAdapter};
use common::{frame, mock_device, mock_port_with_lines};
use pretty_assertions::assert_eq;

#[test]
fn test_full_session_workflow() {
    // Arrange
    let port = mock_port_with_lines("MOCK0", &[b"t1232ABCD\r", b"t7FF0\r"]);
    let mut device = Device::new(port.clone());

    // Act
    device.set_bitrate(500_000).unwrap();
    device.open().unwrap();
    device
        .write_frame(&frame(0x042, &[0x01, 0x02, 0x03]))
        .unwrap();
    let first = device.read_frame().unwrap();
    let second = device.read_frame().unwrap();
    device.close().unwrap();

    // Assert
    assert_eq!(
        port.get_write_log(),
        vec![
            b"S500000\r".to_vec(),
            b"O\r".to_vec(),
            b"t0423010203\r".to_vec(),
            b"C\r".to_vec(),
        ]
    );
    assert_eq!(first, frame(0x123, &[0xAB, 0xCD]));
    assert_eq!(second, frame(0x7FF, &[]));
    assert_eq!(port.pending_reads(), 0);
}

#[test]
fn test_set_bitrate_exact_bytes() {
    let (mut device, port) = mock_device("MOCK0");
    device.set_bitrate(500_000).unwrap();
    device.set_bitrate(10_000).unwrap();
    assert_eq!(port.written_bytes(), b"S500000\rS10000\r");
}

#[test]
fn test_truncated_read_is_an_error() {
    let (mut device, mut port) = mock_device("MOCK0");
    port.enqueue_read(b"t1238AABBCC");

    let err = device.read_frame().unwrap_err();
    assert!(matches!(
        err,
        DeviceError::Codec(CodecError::MalformedPayload {
            expected: 16,
            found: 6
        })
    ));
}

#[test]
fn test_status_lines_are_reported_not_misparsed() {
    // The firmware answers commands with '\r' (ok) or BEL (error).
    let (mut device, mut port) = mock_device("MOCK0");
    port.enqueue_read(b"\r");
    port.enqueue_read(b"\x07");
    port.enqueue_read(b"z\r");

    for expected in [b'\r', 0x07, b'z'] {
        let err = device.read_frame().unwrap_err();
        assert!(
            matches!(
                err,
                DeviceError::Codec(CodecError::UnrecognizedFrameTag(Some(tag))) if tag == expected
            ),
            "unexpected error {err:?}"
        );
    }
}

#[test]
fn test_session_survives_decode_errors() {
    let (mut device, mut port) = mock_device("MOCK0");
    port.enqueue_read(b"t12");
    port.enqueue_read(b"t1001FF\r");

    assert!(matches!(
        device.read_frame(),
        Err(DeviceError::Codec(CodecError::InvalidFrame(
            FrameFault::MalformedIdentifier
        )))
    ));
    assert_eq!(device.read_frame().unwrap(), frame(0x100, &[0xFF]));
}

#[test]
fn test_read_uses_fixed_buffer_and_ignores_trailing_bytes() {
    // One USB packet carrying two lines: a read decodes the first and the
    // rest of the buffer is ignored.
    let (mut device, mut port) = mock_device("MOCK0");
    port.enqueue_read(b"t1232ABCD\rt4560\r");
    assert_eq!(device.read_frame().unwrap(), frame(0x123, &[0xAB, 0xCD]));

    let mut oversized = b"t0000\r".to_vec();
    oversized.resize(cantact::READ_BUFFER_SIZE + 10, b'x');
    port.enqueue_read(&oversized);
    assert_eq!(device.read_frame().unwrap(), frame(0x000, &[]));
    // What did not fit in the 128-byte buffer waits for the next read.
    assert_eq!(port.pending_reads(), 1);
}

#[test]
fn test_transport_errors_pass_through() {
    let (mut device, mut port) = mock_device("MOCK0");
    port.fail_next_write(std::io::ErrorKind::BrokenPipe);

    let err = device.open().unwrap_err();
    match err {
        DeviceError::Transport(PortError::Io(e)) => {
            assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe)
        }
        other => panic!("expected transport error, got {other:?}"),
    }

    port.fail_next_read(std::io::ErrorKind::TimedOut);
    let err = device.read_frame().unwrap_err();
    assert!(err.is_transport());
}

#[test]
fn test_invalid_frames_never_reach_the_wire() {
    let (mut device, port) = mock_device("MOCK0");
    let mut bad = frame(0x100, &[1, 2]);
    bad.dlc = 9;

    let err = device.write_frame(&bad).unwrap_err();
    assert!(matches!(
        err,
        DeviceError::Codec(CodecError::InvalidFrame(FrameFault::DlcOutOfRange(9)))
    ));
    assert!(port.get_write_log().is_empty());
}

#[test]
fn test_device_exposes_its_port() {
    let (mut device, _) = mock_device("can0-mock");
    assert_eq!(device.port().name(), "can0-mock");
    device.port_mut().enqueue_read(b"t0010\r");
    assert_eq!(device.read_frame().unwrap(), frame(0x001, &[]));
}
