//! The request/response exchange with the generator.
//!
//! Every exchange is exactly one request frame followed by one response frame.
//! Nothing is retried here; a caller wanting retry-on-timeout wraps these calls.

use embedded_io::{Error as _, ErrorKind, ReadExactError};
use log::{debug, trace, warn};

use crate::{
    error::{CommunicationError, Error, Result},
    message::{FRAME_LEN, Message},
};

/// `clear` asks the transport for this many bytes at a time while draining the line.
pub const CLEAR_CHUNK_LEN: usize = 25;

/// Drives a byte transport (anything implementing [embedded_io::Read] & [embedded_io::Write])
/// through query, write and clear exchanges.
///
/// The protocol holds no state between calls. Each call borrows the transport mutably for its
/// whole duration, so two exchanges can never interleave on the same line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pfg600Protocol {
    /// Default for the generator is 0x00.
    address: u8,
}

impl Pfg600Protocol {
    pub fn new(address: u8) -> Self {
        Self { address }
    }

    /// Bus address of the generator this protocol talks to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Build a request frame addressed to our generator.
    pub fn message(&self, function_code: u8, data: u16) -> Message {
        Message::new(self.address, function_code, data)
    }

    /// Send `request` with the waiting bit set and return the device's reply.
    ///
    /// Any reply other than a NAK is accepted; its [`Message::data`] carries the answer.
    pub fn query<S: embedded_io::Read + embedded_io::Write>(
        &self,
        transport: &mut S,
        mut request: Message,
    ) -> Result<Message, S::Error> {
        request.set_waiting(true);
        let response = self.exchange(transport, &mut request)?;

        if response.is_nak() {
            warn!("query {:#04X} rejected with NAK", request.function_code());
            return Err(CommunicationError::Nak.into());
        }

        Ok(response)
    }

    /// Send `request` with the waiting bit clear and require an ACK in reply.
    pub fn write<S: embedded_io::Read + embedded_io::Write>(
        &self,
        transport: &mut S,
        mut request: Message,
    ) -> Result<(), S::Error> {
        request.set_waiting(false);
        let response = self.exchange(transport, &mut request)?;

        if response.is_nak() {
            warn!("write {:#04X} rejected with NAK", request.function_code());
            return Err(CommunicationError::Nak.into());
        }

        if !response.is_ack() {
            warn!(
                "write {:#04X} answered with {:#04X} instead of ACK",
                request.function_code(),
                response.function_code()
            );
            return Err(CommunicationError::NotAcked.into());
        }

        Ok(())
    }

    /// Read and discard whatever is buffered on the line until the transport times out.
    ///
    /// The timeout is how this returns successfully; any other transport failure is an error.
    pub fn clear<S: embedded_io::Read>(&self, transport: &mut S) -> Result<(), S::Error> {
        let mut discard = [0u8; CLEAR_CHUNK_LEN];
        loop {
            match transport.read_exact(&mut discard) {
                Ok(()) => trace!("discarded {:02X?}", discard),
                Err(ReadExactError::UnexpectedEof) => return Ok(()),
                Err(ReadExactError::Other(e)) if e.kind() == ErrorKind::TimedOut => {
                    return Ok(());
                }
                Err(ReadExactError::Other(e)) => return Err(Error::Serial(e)),
            }
        }
    }

    /// Send one frame and read back one checksum-valid frame.
    fn exchange<S: embedded_io::Read + embedded_io::Write>(
        &self,
        transport: &mut S,
        request: &mut Message,
    ) -> Result<Message, S::Error> {
        let raw_request = request.encode();
        debug!("send {:02X?}", raw_request);
        transport
            .write_all(&raw_request)
            .and_then(|()| transport.flush())
            .map_err(classify)?;

        let mut raw_response = [0u8; FRAME_LEN];
        transport
            .read_exact(&mut raw_response)
            .map_err(|e| match e {
                ReadExactError::UnexpectedEof => CommunicationError::Timeout.into(),
                ReadExactError::Other(e) => classify(e),
            })?;
        debug!("recv {:02X?}", raw_response);

        let response =
            Message::decode(&raw_response).map_err(|_| CommunicationError::InvalidFrame)?;

        if !response.verify_checksum() {
            warn!(
                "bad checksum in {:02X?}, expected {:#04X}",
                raw_response,
                response.compute_checksum()
            );
            return Err(CommunicationError::BadChecksum.into());
        }

        Ok(response)
    }
}

/// Split transport failures into timeouts and everything else.
fn classify<I: embedded_io::Error>(err: I) -> Error<I> {
    if err.kind() == ErrorKind::TimedOut {
        Error::Communication(CommunicationError::Timeout)
    } else {
        Error::Serial(err)
    }
}
