//! Mock serial port implementation for testing.
//!
//! `MockSerialPort` stands in for a CANtact on the other end of a USB cable.
//! Tests queue up the chunks the "device" will emit and inspect every write
//! the driver made, without any hardware attached.

use super::error::PortError;
use super::traits::SerialPortAdapter;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Inner state of the mock port, shared between clones.
#[derive(Debug, Default)]
struct MockPortState {
    /// Chunks returned by successive reads, one chunk per read call.
    read_chunks: VecDeque<Vec<u8>>,
    /// Log of every write made to the port.
    write_log: Vec<Vec<u8>>,
    /// Error kind the next write fails with.
    fail_next_write: Option<std::io::ErrorKind>,
    /// Error kind the next read fails with.
    fail_next_read: Option<std::io::ErrorKind>,
}

/// Mock serial port implementation for testing.
///
/// Clones share state, so a test can hand one clone to a [`Device`] and keep
/// another to inspect what the device wrote.
///
/// Each queued chunk is delivered by exactly one read call, mirroring how a
/// USB CDC device hands over one packet at a time. A chunk larger than the
/// caller's buffer is split and the remainder is returned by the next read.
///
/// # Example
/// ```
/// use cantact::port::{MockSerialPort, SerialPortAdapter};
///
/// let mut port = MockSerialPort::new("MOCK0");
/// port.enqueue_read(b"t1232ABCD\r");
///
/// let mut buffer = [0u8; 128];
/// let n = port.read_bytes(&mut buffer).unwrap();
/// assert_eq!(&buffer[..n], b"t1232ABCD\r");
///
/// port.write_bytes(b"O\r").unwrap();
/// assert_eq!(port.get_write_log(), vec![b"O\r".to_vec()]);
/// ```
///
/// [`Device`]: crate::device::Device
#[derive(Clone)]
pub struct MockSerialPort {
    name: String,
    state: Arc<Mutex<MockPortState>>,
}

impl MockSerialPort {
    /// Create a new mock serial port with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Arc::new(Mutex::new(MockPortState::default())),
        }
    }

    /// Queue one chunk to be returned by a future read.
    pub fn enqueue_read(&mut self, data: &[u8]) {
        self.state.lock().read_chunks.push_back(data.to_vec());
    }

    /// Get a copy of every write made so far, in order.
    pub fn get_write_log(&self) -> Vec<Vec<u8>> {
        self.state.lock().write_log.clone()
    }

    /// All writes so far concatenated into one byte string.
    pub fn written_bytes(&self) -> Vec<u8> {
        self.state.lock().write_log.concat()
    }

    /// Clear the write log.
    pub fn clear_write_log(&mut self) {
        self.state.lock().write_log.clear();
    }

    /// Make the next write fail with an I/O error of the given kind.
    pub fn fail_next_write(&mut self, kind: std::io::ErrorKind) {
        self.state.lock().fail_next_write = Some(kind);
    }

    /// Make the next read fail with an I/O error of the given kind.
    pub fn fail_next_read(&mut self, kind: std::io::ErrorKind) {
        self.state.lock().fail_next_read = Some(kind);
    }

    /// Number of chunks still waiting to be read.
    pub fn pending_reads(&self) -> usize {
        self.state.lock().read_chunks.len()
    }
}

impl SerialPortAdapter for MockSerialPort {
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, PortError> {
        let mut state = self.state.lock();

        if let Some(kind) = state.fail_next_write.take() {
            return Err(PortError::Io(std::io::Error::new(kind, "injected write failure")));
        }

        state.write_log.push(data.to_vec());
        Ok(data.len())
    }

    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, PortError> {
        let mut state = self.state.lock();

        if let Some(kind) = state.fail_next_read.take() {
            return Err(PortError::Io(std::io::Error::new(kind, "injected read failure")));
        }

        // A real port would block here forever; the mock reports the
        // condition instead so a test cannot hang.
        let Some(mut chunk) = state.read_chunks.pop_front() else {
            return Err(PortError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "mock port has no more data queued",
            )));
        };

        let n = chunk.len().min(buffer.len());
        buffer[..n].copy_from_slice(&chunk[..n]);
        if n < chunk.len() {
            state.read_chunks.push_front(chunk.split_off(n));
        }
        Ok(n)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for MockSerialPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSerialPort")
            .field("name", &self.name)
            .field("pending_reads", &self.pending_reads())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_chunk_per_read() {
        let mut port = MockSerialPort::new("MOCK0");
        port.enqueue_read(b"t1000\r");
        port.enqueue_read(b"t2000\r");

        let mut buffer = [0u8; 64];
        let n = port.read_bytes(&mut buffer).unwrap();
        assert_eq!(&buffer[..n], b"t1000\r");
        let n = port.read_bytes(&mut buffer).unwrap();
        assert_eq!(&buffer[..n], b"t2000\r");
    }

    #[test]
    fn test_oversized_chunk_is_split() {
        let mut port = MockSerialPort::new("MOCK0");
        port.enqueue_read(b"t1232ABCD\r");

        let mut buffer = [0u8; 4];
        let n = port.read_bytes(&mut buffer).unwrap();
        assert_eq!(&buffer[..n], b"t123");
        assert_eq!(port.pending_reads(), 1);

        let mut buffer = [0u8; 64];
        let n = port.read_bytes(&mut buffer).unwrap();
        assert_eq!(&buffer[..n], b"2ABCD\r");
    }

    #[test]
    fn test_write_logging() {
        let mut port = MockSerialPort::new("MOCK0");
        port.write_bytes(b"S500000\r").unwrap();
        port.write_bytes(b"O\r").unwrap();

        let log = port.get_write_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0], b"S500000\r");
        assert_eq!(port.written_bytes(), b"S500000\rO\r");

        port.clear_write_log();
        assert!(port.get_write_log().is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let port = MockSerialPort::new("MOCK0");
        let mut handle = port.clone();
        handle.write_bytes(b"C\r").unwrap();
        assert_eq!(port.get_write_log(), vec![b"C\r".to_vec()]);
    }

    #[test]
    fn test_injected_failures_fire_once() {
        let mut port = MockSerialPort::new("MOCK0");
        port.fail_next_write(std::io::ErrorKind::BrokenPipe);

        let err = port.write_bytes(b"O\r").unwrap_err();
        assert!(matches!(err, PortError::Io(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe));
        assert!(port.get_write_log().is_empty());
        assert!(port.write_bytes(b"O\r").is_ok());

        port.fail_next_read(std::io::ErrorKind::TimedOut);
        port.enqueue_read(b"t0000\r");
        let mut buffer = [0u8; 16];
        assert!(port.read_bytes(&mut buffer).is_err());
        assert_eq!(port.read_bytes(&mut buffer).unwrap(), 6);
    }

    #[test]
    fn test_empty_queue_reports_eof() {
        let mut port = MockSerialPort::new("MOCK0");
        let mut buffer = [0u8; 10];

        match port.read_bytes(&mut buffer) {
            Err(PortError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
            other => panic!("Expected UnexpectedEof, got {:?}", other),
        }
    }
}
