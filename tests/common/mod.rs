//! Shared test utilities for the cantact integration tests.

#![allow(dead_code)]

use cantact::{Device, Frame, MockSerialPort};

/// Create a device over a fresh mock port, plus a handle to inspect it.
pub fn mock_device(port_name: &str) -> (Device<MockSerialPort>, MockSerialPort) {
    let port = MockSerialPort::new(port_name);
    (Device::new(port.clone()), port)
}

/// Create a mock port that will answer reads with the given chunks, in order.
pub fn mock_port_with_lines(port_name: &str, lines: &[&[u8]]) -> MockSerialPort {
    let mut port = MockSerialPort::new(port_name);
    for line in lines {
        port.enqueue_read(line);
    }
    port
}

/// Build a frame, panicking on invalid input.
pub fn frame(id: u16, data: &[u8]) -> Frame {
    Frame::new(id, data).expect("test frame must be valid")
}
