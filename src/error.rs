//! Our error types for the PFG 600 generator.

use thiserror::Error;

pub type Result<T, I> = core::result::Result<T, Error<I>>;

/// Errors raised while building or parsing a single frame. No I/O is involved.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageError {
    #[error("Waiting bit must be either 0 or 1, got {0}")]
    InvalidField(u8),
    #[error("Frame must be exactly 5 bytes long, got {0}")]
    InvalidFrameLength(usize),
}

/// Reasons a single request/response exchange with the generator failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommunicationError {
    #[error("Communication timeout")]
    Timeout,
    #[error("Response could not be decoded into a frame")]
    InvalidFrame,
    #[error("Received an invalid checksum")]
    BadChecksum,
    #[error("Received a NAK")]
    Nak,
    #[error("Received neither an ACK nor a NAK")]
    NotAcked,
}

/// Custom error type for PFG 600 communications.
#[derive(Error, Debug)]
pub enum Error<I: embedded_io::Error> {
    #[error("Serial communication error")]
    Serial(I),
    #[error("Waiting bit must be either 0 or 1, got {0}")]
    InvalidField(u8),
    #[error("Frame must be exactly 5 bytes long, got {0}")]
    InvalidFrameLength(usize),
    #[error("Communication error: {0}")]
    Communication(CommunicationError),
    #[error("Invalid range")]
    InvalidRange,
    #[error("Device replied with unknown value {0}")]
    UnknownValue(u16),
}

impl<I: embedded_io::Error> Error<I> {
    /// The exchange failure behind this error, if it is one.
    pub fn communication(&self) -> Option<CommunicationError> {
        match self {
            Error::Communication(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl<I: embedded_io::Error> From<CommunicationError> for Error<I> {
    fn from(err: CommunicationError) -> Self {
        Error::Communication(err)
    }
}

impl<I: embedded_io::Error> From<MessageError> for Error<I> {
    fn from(err: MessageError) -> Self {
        match err {
            MessageError::InvalidField(value) => Error::InvalidField(value),
            MessageError::InvalidFrameLength(len) => Error::InvalidFrameLength(len),
        }
    }
}
