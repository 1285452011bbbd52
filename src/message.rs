//! Encoding and decoding of the 5 byte PFG 600 wire frame.
//!
//! | Byte | Content                                         |
//! |------|-------------------------------------------------|
//! | 0    | Device address.                                 |
//! | 1    | Waiting bit (bit 7) and function code (bits 6-0). |
//! | 2    | Data high byte.                                 |
//! | 3    | Data low byte.                                  |
//! | 4    | XOR of bytes 0-3.                               |

use modular_bitfield::prelude::*;

use crate::error::MessageError;

/// Every frame on the wire, in either direction, is exactly this long.
pub const FRAME_LEN: usize = 5;

/// Reserved response function code acknowledging a request.
pub const ACK: u8 = 0x06;
/// Reserved response function code rejecting a request.
pub const NAK: u8 = 0x15;

const FUNCTION_CODE_MASK: u8 = 0x7F;

/// Layout of byte 1 of a frame. Fields are packed from the least significant bit.
#[bitfield]
#[derive(Clone, Copy)]
struct FunctionByte {
    function_code: B7,
    waiting: bool,
}

/// A single PFG 600 frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Message {
    address: u8,
    /// Set for a query ("reply with data"), clear for a write ("reply with ACK").
    waiting: bool,
    /// Only the low 7 bits are ever stored.
    function_code: u8,
    data: u16,
    checksum: u8,
}

impl Message {
    /// Create a frame for `address` with the waiting bit clear.
    ///
    /// `function_code` is masked to 7 bits.
    pub fn new(address: u8, function_code: u8, data: u16) -> Self {
        Self {
            address,
            waiting: false,
            function_code: function_code & FUNCTION_CODE_MASK,
            data,
            checksum: 0,
        }
    }

    /// Create a frame with an explicit waiting bit, which must be `0` or `1`.
    pub fn with_waiting_bit(
        address: u8,
        function_code: u8,
        data: u16,
        waiting_bit: u8,
    ) -> Result<Self, MessageError> {
        let mut message = Self::new(address, function_code, data);
        message.set_waiting_bit(waiting_bit)?;
        Ok(message)
    }

    /// Create a frame addressed to device `0`.
    ///
    /// The waiting bit is left clear; [`Pfg600Protocol`](crate::protocol::Pfg600Protocol)
    /// sets it depending on whether the frame is sent as a query or a write.
    pub fn simple(function_code: u8, data: u16) -> Self {
        Self::new(0, function_code, data)
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn set_address(&mut self, address: u8) {
        self.address = address;
    }

    pub fn function_code(&self) -> u8 {
        self.function_code
    }

    pub fn set_function_code(&mut self, function_code: u8) {
        self.function_code = function_code & FUNCTION_CODE_MASK;
    }

    /// The waiting bit as it appears on the wire, `0` or `1`.
    pub fn waiting_bit(&self) -> u8 {
        self.waiting as u8
    }

    pub fn set_waiting_bit(&mut self, waiting_bit: u8) -> Result<(), MessageError> {
        match waiting_bit {
            0 => self.waiting = false,
            1 => self.waiting = true,
            other => return Err(MessageError::InvalidField(other)),
        }
        Ok(())
    }

    pub fn set_waiting(&mut self, waiting: bool) {
        self.waiting = waiting;
    }

    pub fn data(&self) -> u16 {
        self.data
    }

    pub fn set_data(&mut self, data: u16) {
        self.data = data;
    }

    /// The checksum byte last encoded or decoded.
    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    pub fn set_checksum(&mut self, checksum: u8) {
        self.checksum = checksum;
    }

    /// Byte 1 of the frame: `waiting << 7 | function_code`.
    pub fn function_byte(&self) -> u8 {
        FunctionByte::new()
            .with_function_code(self.function_code)
            .with_waiting(self.waiting)
            .into_bytes()[0]
    }

    pub fn data_high(&self) -> u8 {
        self.data.to_be_bytes()[0]
    }

    pub fn data_low(&self) -> u8 {
        self.data.to_be_bytes()[1]
    }

    /// XOR of the address, function byte and both data bytes.
    pub fn compute_checksum(&self) -> u8 {
        self.address ^ self.function_byte() ^ self.data_high() ^ self.data_low()
    }

    /// Whether the stored checksum matches the other four fields.
    pub fn verify_checksum(&self) -> bool {
        self.compute_checksum() == self.checksum
    }

    /// Serialise this frame for transmission.
    ///
    /// The stored checksum is always overwritten with a freshly computed one first.
    pub fn encode(&mut self) -> [u8; FRAME_LEN] {
        self.checksum = self.compute_checksum();
        [
            self.address,
            self.function_byte(),
            self.data_high(),
            self.data_low(),
            self.checksum,
        ]
    }

    /// Parse a received frame. The checksum is stored as received, not verified.
    pub fn decode(bytes: &[u8]) -> Result<Self, MessageError> {
        let frame: [u8; FRAME_LEN] = bytes
            .try_into()
            .map_err(|_| MessageError::InvalidFrameLength(bytes.len()))?;

        let function = FunctionByte::from_bytes([frame[1]]);
        Ok(Self {
            address: frame[0],
            waiting: function.waiting(),
            function_code: function.function_code(),
            data: u16::from_be_bytes([frame[2], frame[3]]),
            checksum: frame[4],
        })
    }

    pub fn is_ack(&self) -> bool {
        self.function_code == ACK
    }

    pub fn is_nak(&self) -> bool {
        self.function_code == NAK
    }
}
