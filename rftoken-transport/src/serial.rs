//! Serial transport

use std::io::{Read, Write};
use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;
use serialport::{DataBits, Parity, StopBits};
use tracing::{debug, trace};

use crate::{error::*, Transport};

/// Serial transport for the token reader
///
/// The link is fixed at 8 data bits, no parity, one stop bit; only the
/// baud rate is negotiable. The port timeout defaults to zero so reads
/// poll and return immediately; the exchange above this layer owns all
/// waiting.
pub struct SerialTransport {
    path: String,
    baud: u32,
    read_timeout: Duration,
    port: Option<Box<dyn serialport::SerialPort>>,
}

impl SerialTransport {
    /// Create a new serial transport (not yet opened)
    pub fn new(path: impl Into<String>, baud: u32) -> Self {
        Self {
            path: path.into(),
            baud,
            read_timeout: Duration::ZERO,
            port: None,
        }
    }

    /// Set the base read timeout of the port
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn connect(&mut self) -> Result<()> {
        if self.is_connected() {
            return Err(Error::AlreadyConnected);
        }

        debug!("Opening serial port {} at {} baud...", self.path, self.baud);

        let port = serialport::new(&self.path, self.baud)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .timeout(self.read_timeout)
            .open()
            .map_err(|source| Error::Open {
                port: self.path.clone(),
                source,
            })?;

        debug!("Opened {}", self.path);

        self.port = Some(port);
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        if self.port.take().is_some() {
            debug!("Closed {}", self.path);
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.port.is_some()
    }

    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        trace!("Sending {} bytes: {:02X?}", data.len(), data);

        port.write_all(data)?;
        port.flush()?;

        Ok(())
    }

    async fn receive(&mut self, max_bytes: usize) -> Result<BytesMut> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        let mut buf = vec![0u8; max_bytes];
        match port.read(&mut buf) {
            Ok(n) => {
                trace!("Received {} bytes: {:02X?}", n, &buf[..n]);
                Ok(BytesMut::from(&buf[..n]))
            }
            // Nothing waiting in the port buffer.
            Err(e)
                if e.kind() == std::io::ErrorKind::TimedOut
                    || e.kind() == std::io::ErrorKind::WouldBlock =>
            {
                Ok(BytesMut::new())
            }
            Err(e) => Err(Error::Io(e)),
        }
    }

    fn port_name(&self) -> String {
        self.path.clone()
    }
}
