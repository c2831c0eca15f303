//! Transport layer for the token reader protocol
//!
//! Provides serial-port communication with the reader.

pub mod error;
pub mod serial;

pub use error::{Error, Result};
pub use serial::SerialTransport;

pub use serialport::{SerialPortInfo, SerialPortType};

use async_trait::async_trait;
use bytes::BytesMut;

/// Transport trait for the byte-oriented channel to the reader
///
/// The protocol supplies its own timing, so `receive` must not block
/// waiting for bytes: when nothing has arrived it returns an empty
/// buffer and the caller decides what that means.
#[async_trait]
pub trait Transport: Send {
    /// Open the channel
    async fn connect(&mut self) -> Result<()>;

    /// Close the channel
    async fn disconnect(&mut self) -> Result<()>;

    /// Check if the channel is open
    fn is_connected(&self) -> bool;

    /// Send raw bytes
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive up to `max_bytes` of whatever has arrived (possibly empty)
    async fn receive(&mut self, max_bytes: usize) -> Result<BytesMut>;

    /// Get the port identifier
    fn port_name(&self) -> String;
}

/// Enumerate the serial ports visible on this host
pub fn available_ports() -> Result<Vec<SerialPortInfo>> {
    serialport::available_ports().map_err(Error::from)
}
