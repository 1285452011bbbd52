//! We use this mocking module in unit tests to emulate the generator's serial line.
//!
//! Once the scripted response bytes run out, reads fail with [`MockSerialError::Timeout`],
//! just like a real port with a read timeout configured.

/// Our mock type used to emulate a serial port.
pub struct MockSerial {
    /// Buffer to store data written to the mock serial port
    write_buffer: heapless::Vec<u8, 256>,
    /// Buffer containing pre-configured response data to be read
    read_buffer: heapless::Vec<u8, 256>,
    /// Current position in the read buffer
    read_position: usize,
    /// Number of `read` calls made so far
    read_calls: usize,
    /// Simulate the port failing to send before its timeout
    should_timeout_on_write: bool,
    /// Simulate a hardware fault on read
    should_error_on_read: bool,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum MockSerialError {
    /// Simulated timeout error
    #[error("Timed out")]
    Timeout,
    /// Simulated buffer overflow
    #[error("Buffer overflow")]
    BufferOverflow,
    /// Generic simulated error for testing
    #[error("Simulated error")]
    SimulatedError,
}

impl embedded_io::Error for MockSerialError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            MockSerialError::Timeout => embedded_io::ErrorKind::TimedOut,
            MockSerialError::BufferOverflow => embedded_io::ErrorKind::OutOfMemory,
            MockSerialError::SimulatedError => embedded_io::ErrorKind::Other,
        }
    }
}

impl embedded_io::ErrorType for MockSerial {
    type Error = MockSerialError;
}

impl embedded_io::Write for MockSerial {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.should_timeout_on_write {
            return Err(MockSerialError::Timeout);
        }

        self.write_buffer
            .extend_from_slice(buf)
            .map_err(|_| MockSerialError::BufferOverflow)?;

        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if self.should_timeout_on_write {
            return Err(MockSerialError::Timeout);
        }
        Ok(())
    }
}

impl embedded_io::Read for MockSerial {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.read_calls += 1;

        if self.should_error_on_read {
            return Err(MockSerialError::SimulatedError);
        }

        if self.read_position >= self.read_buffer.len() {
            return Err(MockSerialError::Timeout);
        }

        let available_bytes = self.read_buffer.len() - self.read_position;
        let bytes_to_read = core::cmp::min(buf.len(), available_bytes);

        buf[..bytes_to_read].copy_from_slice(
            &self.read_buffer[self.read_position..self.read_position + bytes_to_read],
        );

        self.read_position += bytes_to_read;
        Ok(bytes_to_read)
    }
}

impl MockSerial {
    /// Create a new MockSerial instance with empty buffers
    pub fn new() -> Self {
        Self {
            write_buffer: heapless::Vec::new(),
            read_buffer: heapless::Vec::new(),
            read_position: 0,
            read_calls: 0,
            should_timeout_on_write: false,
            should_error_on_read: false,
        }
    }

    /// Create a mock which answers with `data` before going quiet.
    pub fn with_response(data: &[u8]) -> Self {
        let mut mock = Self::new();
        mock.set_read_data(data).unwrap();
        mock
    }

    /// Set the data that will be returned when read() is called
    pub fn set_read_data(&mut self, data: &[u8]) -> Result<(), MockSerialError> {
        self.read_buffer.clear();
        self.read_position = 0;

        self.read_buffer
            .extend_from_slice(data)
            .map_err(|_| MockSerialError::BufferOverflow)
    }

    /// Get a reference to the data that was written to this mock serial port
    pub fn written_data(&self) -> &[u8] {
        &self.write_buffer
    }

    /// Number of scripted bytes not read yet.
    pub fn unread(&self) -> usize {
        self.read_buffer.len() - self.read_position
    }

    pub fn read_calls(&self) -> usize {
        self.read_calls
    }

    /// Configure whether write operations should time out
    pub fn set_write_timeout(&mut self, should_timeout: bool) {
        self.should_timeout_on_write = should_timeout;
    }

    /// Configure whether read operations should fail with a non-timeout error
    pub fn set_read_error(&mut self, should_error: bool) {
        self.should_error_on_read = should_error;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_io::{Error, Read, Write};

    #[test]
    fn test_write_records_data() {
        let mut mock = MockSerial::new();
        mock.write_all(b"Hello, ").unwrap();
        mock.write_all(b"World!").unwrap();
        assert_eq!(mock.written_data(), b"Hello, World!");
    }

    #[test]
    fn test_write_buffer_overflow() {
        let mut mock = MockSerial::new();
        let large_data = [0u8; 300];
        assert_eq!(mock.write(&large_data), Err(MockSerialError::BufferOverflow));
    }

    #[test]
    fn test_read_partial_then_timeout() {
        let mut mock = MockSerial::with_response(b"Hello World");

        let mut buffer = [0u8; 5];
        assert_eq!(mock.read(&mut buffer), Ok(5));
        assert_eq!(&buffer, b"Hello");
        assert_eq!(mock.unread(), 6);

        let mut buffer = [0u8; 10];
        assert_eq!(mock.read(&mut buffer), Ok(6));
        assert_eq!(&buffer[..6], b" World");

        assert_eq!(mock.read(&mut buffer), Err(MockSerialError::Timeout));
        assert_eq!(mock.read_calls(), 3);
    }

    #[test]
    fn test_write_timeout_simulation() {
        let mut mock = MockSerial::new();
        mock.set_write_timeout(true);

        assert_eq!(mock.write(b"test"), Err(MockSerialError::Timeout));
        assert_eq!(mock.flush(), Err(MockSerialError::Timeout));
        assert!(mock.written_data().is_empty());
    }

    #[test]
    fn test_read_error_simulation() {
        let mut mock = MockSerial::with_response(b"test data");
        mock.set_read_error(true);

        let mut buffer = [0u8; 10];
        assert_eq!(mock.read(&mut buffer), Err(MockSerialError::SimulatedError));
    }

    #[test]
    fn test_error_kinds() {
        assert!(matches!(
            MockSerialError::Timeout.kind(),
            embedded_io::ErrorKind::TimedOut
        ));
        assert!(matches!(
            MockSerialError::BufferOverflow.kind(),
            embedded_io::ErrorKind::OutOfMemory
        ));
        assert!(matches!(
            MockSerialError::SimulatedError.kind(),
            embedded_io::ErrorKind::Other
        ));
    }
}
