//! Serial line settings for talking to the generator.
//!
//! The library never opens a port itself. These settings are for whatever code builds the
//! transport handed to [`Pfg600`](crate::driver::Pfg600).

use fugit::MillisDurationU32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Odd,
    Even,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortSettings {
    pub baud_rate: u32,
    pub data_bits: u8,
    pub parity: Parity,
    pub stop_bits: u8,
    /// How long a read or write may take before the transport reports a timeout.
    ///
    /// [`Pfg600Protocol::clear`](crate::protocol::Pfg600Protocol::clear) waits this long
    /// on a quiet line before returning.
    pub timeout: MillisDurationU32,
    /// Bus address of the generator.
    pub address: u8,
}

impl Default for PortSettings {
    /// 9600 baud, 8N1, 200ms timeout, address 0.
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            data_bits: 8,
            parity: Parity::None,
            stop_bits: 1,
            timeout: MillisDurationU32::millis(200),
            address: 0x00,
        }
    }
}

impl PortSettings {
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn with_timeout(mut self, timeout: MillisDurationU32) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }
}
