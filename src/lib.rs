//! This crate provides an interface for communicating with and controlling the Trumpf PFG 600 RF generator.
//!
//! It supports `no-std` environments by use of the `no_std` feature flag.
//!
//! Every exchange with the generator is one 5 byte request frame followed by one 5 byte
//! response frame, each protected by an XOR checksum. See [`message`] for the frame layout
//! and [`protocol`] for how query, write and clear exchanges are driven.
//!
//! The serial port used for generator comms should be configured like so:
//! * Default baud rate: 9600
//! * Data bits: 8
//! * Stop bits: 1
//! * Parity: None
//! * Read timeout: ~200ms
//!
//! [`config::PortSettings::default`] holds these values.
//!
//! Frames sent and received are logged at `debug` level through the [`log`] facade.

#![cfg_attr(feature = "no_std", no_std)]

pub mod config;
pub mod driver;
pub mod error;
pub mod message;
pub mod protocol;
pub mod register;

#[cfg(test)]
mod mock_serial;
