//! High-level device interface

use std::time::Duration;

use bytes::{BufMut, Bytes, BytesMut};
use tokio::time::sleep;
use tracing::{debug, info, trace, warn};

use rftoken_core::constants::{DRAIN_READ_LIMIT, ERR_NONE, LedColor, SETTLE_DELAY};
use rftoken_core::frame::hex_str;
use rftoken_core::{Frame, Opcode, Response, Session};
use rftoken_transport::{SerialTransport, Transport};
use rftoken_types::{DeviceInfo, TokenId};

use crate::error::{Error, Result};

/// RFID token reader
///
/// High-level interface for one reader on one serial port. The protocol
/// allows a single outstanding exchange, which the `&mut self` receivers
/// enforce; there is no request pipelining and no automatic retry.
///
/// # Examples
///
/// ```no_run
/// use rftoken::Device;
///
/// #[tokio::main]
/// async fn main() -> rftoken::Result<()> {
///     let mut device = Device::new("/dev/ttyUSB0", 38_400);
///
///     device.connect().await?;
///
///     let info = device.get_info().await?;
///     println!("Reader: {}", info);
///
///     device.disconnect().await?;
///     Ok(())
/// }
/// ```
pub struct Device {
    transport: Box<dyn Transport>,
    session: Session,
    settle_delay: Duration,
}

impl Device {
    /// Create a new device on a serial port
    pub fn new(path: impl Into<String>, baud: u32) -> Self {
        Self::with_transport(Box::new(SerialTransport::new(path, baud)))
    }

    /// Create a device over an already-built transport
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            session: Session::new(),
            settle_delay: SETTLE_DELAY,
        }
    }

    /// Override the settle delay between write and each read phase
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Initialization state handle for this device
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Check if the transport is open
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Open the transport and, if not yet done, run the init sequence
    ///
    /// Init identifies the reader and switches its LED green. An init
    /// failure is logged but does not fail `connect`; the session stays
    /// uninitialized and the next `connect` tries again.
    pub async fn connect(&mut self) -> Result<()> {
        info!("Connecting to {}...", self.transport.port_name());

        self.transport.connect().await?;

        if !self.session.is_ready() {
            self.initialize().await;
        }

        Ok(())
    }

    /// Close the transport
    pub async fn disconnect(&mut self) -> Result<()> {
        self.transport.disconnect().await?;
        info!("Disconnected");
        Ok(())
    }

    async fn initialize(&mut self) {
        match self.get_info().await {
            Ok(device_info) => match self.set_led(LedColor::Green).await {
                Ok(()) => {
                    self.session.mark_ready();
                    info!("Device initialized: {}", device_info);
                }
                Err(e) => warn!("Init LED command failed: {}", e),
            },
            Err(e) => warn!("Init identification failed: {}", e),
        }
    }

    /// Get the reader identification data
    pub async fn get_info(&mut self) -> Result<DeviceInfo> {
        debug!("Getting device info...");

        let response = self
            .execute(Opcode::GetInfo, Bytes::new(), Some(ERR_NONE))
            .await?;

        Ok(DeviceInfo::new(response.payload.to_vec()))
    }

    /// Sound the buzzer for the given duration
    pub async fn beep(&mut self, duration: u8) -> Result<()> {
        debug!("Beeping (duration={})...", duration);

        self.execute(
            Opcode::Beep,
            Bytes::copy_from_slice(&[duration]),
            Some(ERR_NONE),
        )
        .await?;

        Ok(())
    }

    /// Set the reader LED
    pub async fn set_led(&mut self, color: LedColor) -> Result<()> {
        debug!("Setting LED to {:?}...", color);

        self.execute(
            Opcode::SetLed,
            Bytes::copy_from_slice(&[color.into()]),
            Some(ERR_NONE),
        )
        .await?;

        Ok(())
    }

    /// Poll for a token in the reader's field
    ///
    /// Returns `Ok(None)` when no card is present: the reader either
    /// reports a non-zero status for the read, or answers with the
    /// all-zero id. Transport and framing failures are still errors.
    pub async fn read_token(&mut self) -> Result<Option<TokenId>> {
        let response = self.execute(Opcode::ReadTag, Bytes::new(), None).await?;

        if !response.is_ok() {
            debug!("No token in field (status #{})", response.status);
            return Ok(None);
        }

        let token = TokenId::try_from(response.payload.as_ref())?;
        if token.is_blank() {
            return Ok(None);
        }

        Ok(Some(token))
    }

    /// Write a token id to the card in the field
    ///
    /// `lock` makes the card read-only. This is irreversible.
    pub async fn write_token(&mut self, token: &TokenId, lock: bool) -> Result<()> {
        self.write_tag(Opcode::WriteTag, token, lock).await
    }

    /// Write a token id to the card's reserve page
    ///
    /// The variant the reader tooling uses by default; `lock` as for
    /// [`Device::write_token`].
    pub async fn write_token_reserve(&mut self, token: &TokenId, lock: bool) -> Result<()> {
        self.write_tag(Opcode::WriteTagReserve, token, lock).await
    }

    async fn write_tag(&mut self, opcode: Opcode, token: &TokenId, lock: bool) -> Result<()> {
        debug!("Writing token {} (lock={})...", token, lock);

        let mut payload = BytesMut::with_capacity(1 + TokenId::SIZE);
        payload.put_u8(if lock { 0x01 } else { 0x00 });
        payload.put_slice(token.as_bytes());

        self.execute(opcode, payload.freeze(), Some(ERR_NONE))
            .await?;

        Ok(())
    }

    /// One request/response exchange
    ///
    /// The reader answers on its own schedule and the port does not block
    /// on arrival, so the exchange sleeps the settle delay, probes for a
    /// first byte (none means the command timed out), sleeps again and
    /// drains the rest of the reply before decoding.
    async fn execute(
        &mut self,
        opcode: Opcode,
        payload: Bytes,
        check: Option<u8>,
    ) -> Result<Response> {
        self.ensure_connected()?;

        let frame = Frame::with_payload(opcode, payload)?;
        let encoded = frame.encode();

        trace!(">> {}", hex_str(&encoded));
        self.transport.send(&encoded).await?;

        sleep(self.settle_delay).await;
        let mut raw = self.transport.receive(1).await?;
        if raw.is_empty() {
            return Err(Error::Timeout);
        }

        sleep(self.settle_delay).await;
        let rest = self.transport.receive(DRAIN_READ_LIMIT).await?;
        raw.extend_from_slice(&rest);

        trace!("<< {}", hex_str(&raw));

        let response = Response::decode(opcode, raw)?;

        if let Some(expected) = check {
            response.check_status(expected)?;
        }

        Ok(response)
    }

    fn ensure_connected(&self) -> Result<()> {
        if !self.is_connected() {
            return Err(Error::NotConnected);
        }
        Ok(())
    }
}
