//! Protocol frame structure and encoding/decoding

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

use crate::{
    checksum,
    command::Opcode,
    constants::{ERR_NONE, MAX_PAYLOAD_SIZE, OPCODE_SIZE, PREAMBLE, TOKEN_SIZE},
    error::{Error, Result},
};

/// Outgoing protocol frame
///
/// # Frame Structure
///
/// ```text
/// ┌─────────────┬─────────────┬─────────────┬─────────────┬─────────────┐
/// │  Preamble   │   Length    │   Opcode    │   Payload   │  Checksum   │
/// │  AA DD 00   │   1 byte    │   2 bytes   │ 0–252 bytes │   1 byte    │
/// └─────────────┴─────────────┴─────────────┴─────────────┴─────────────┘
/// ```
///
/// The length byte counts the opcode and payload bytes plus one; the
/// checksum is the XOR fold of the opcode and payload bytes.
///
/// # Examples
///
/// ```
/// use rftoken_core::{Frame, Opcode};
///
/// let frame = Frame::new(Opcode::GetInfo);
/// assert_eq!(frame.encode().as_ref(), [0xAA, 0xDD, 0x00, 0x03, 0x01, 0x02, 0x03]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    /// Opcode of the command
    pub opcode: Opcode,

    /// Request payload (command-specific data)
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame with empty payload
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            payload: Bytes::new(),
        }
    }

    /// Create a frame with payload
    ///
    /// # Errors
    ///
    /// Returns [`Error::PayloadTooLarge`] when the payload exceeds the
    /// 252-byte limit the length byte allows.
    pub fn with_payload(opcode: Opcode, payload: impl Into<Bytes>) -> Result<Self> {
        let payload = payload.into();

        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(Error::PayloadTooLarge {
                size: payload.len(),
                max: MAX_PAYLOAD_SIZE,
            });
        }

        Ok(Self { opcode, payload })
    }

    /// Calculate the checksum for this frame
    pub fn checksum(&self) -> u8 {
        checksum::calculate(self.opcode, &self.payload)
    }

    /// Encode the frame to wire bytes
    pub fn encode(&self) -> BytesMut {
        let total_size = PREAMBLE.len() + 1 + OPCODE_SIZE + self.payload.len() + 1;
        let mut buf = BytesMut::with_capacity(total_size);

        buf.put_slice(&PREAMBLE);
        buf.put_u8((OPCODE_SIZE + self.payload.len() + 1) as u8);
        buf.put_u16(self.opcode.into());
        buf.put_slice(&self.payload);
        buf.put_u8(self.checksum());

        buf
    }

    /// Get total frame size on the wire
    pub fn size(&self) -> usize {
        PREAMBLE.len() + 1 + OPCODE_SIZE + self.payload.len() + 1
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("opcode", &self.opcode)
            .field("checksum", &format!("0x{:02X}", self.checksum()))
            .field("payload_len", &self.payload.len())
            .finish()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame[{}](len={})", self.opcode, self.payload.len())
    }
}

/// Parsed device reply
///
/// # Reply Structure
///
/// ```text
/// ┌───────────┬─────────┬─────────────┬─────────┬──────────┬───────────┐
/// │ Preamble  │ Length  │ Opcode echo │ Status  │   Data   │ Trailing  │
/// │ AA DD 00  │ 1 byte  │   2 bytes   │ 1 byte  │ variable │  1 byte   │
/// └───────────┴─────────┴─────────────┴─────────┴──────────┴───────────┘
/// ```
///
/// The length byte must equal the total reply size minus 4. The trailing
/// byte is the reply checksum; it is carried but not re-verified (see
/// [`Response::decode`]).
#[derive(Clone, PartialEq, Eq)]
pub struct Response {
    /// Opcode echoed by the device
    pub opcode: Opcode,

    /// Device-reported status code (0 = success)
    pub status: u8,

    /// Reply payload
    pub payload: Bytes,
}

impl Response {
    /// Minimum reply size: preamble plus length byte
    pub const MIN_SIZE: usize = 4;

    /// Decode and validate a reply buffer
    ///
    /// Validation order, first failure wins:
    /// 1. at least [`Response::MIN_SIZE`] bytes received, else
    ///    [`Error::BadLength`]
    /// 2. length byte equals `len - 4`, else [`Error::BadLength`]
    /// 3. preamble matches, else [`Error::BadFormat`]
    /// 4. opcode echo matches the opcode that was sent, else
    ///    [`Error::BadFormat`]; this is what catches desynchronized
    ///    replies, since the protocol has no request identifiers
    ///
    /// The trailing checksum byte is NOT re-verified; malformed-but-
    /// plausible replies that only differ in the trailing byte are
    /// accepted, matching the reader firmware's observed behavior.
    ///
    /// For [`Opcode::ReadTag`] the payload is the fixed-width token id:
    /// the last five bytes ahead of the trailing byte, skipping reserved
    /// bytes the generic payload window would include.
    pub fn decode(sent: Opcode, buf: BytesMut) -> Result<Self> {
        let raw = buf.freeze();

        if raw.len() < Self::MIN_SIZE {
            return Err(Error::BadLength { raw: raw.to_vec() });
        }

        if raw[3] as usize != raw.len() - 4 {
            return Err(Error::BadLength { raw: raw.to_vec() });
        }

        if raw[..3] != PREAMBLE {
            return Err(Error::BadFormat { raw: raw.to_vec() });
        }

        if raw.get(4..6) != Some(sent.bytes().as_slice()) {
            return Err(Error::BadFormat { raw: raw.to_vec() });
        }

        // Validated, but truncated before the status byte.
        let Some(&status) = raw.get(6) else {
            return Err(Error::BadLength { raw: raw.to_vec() });
        };

        let payload = if sent == Opcode::ReadTag {
            raw.slice(raw.len() - (TOKEN_SIZE + 1)..raw.len() - 1)
        } else if raw.len() > 7 {
            raw.slice(7..raw.len() - 1)
        } else {
            Bytes::new()
        };

        Ok(Self {
            opcode: sent,
            status,
            payload,
        })
    }

    /// Check if the device reported success
    pub fn is_ok(&self) -> bool {
        self.status == ERR_NONE
    }

    /// Enforce an expected status code
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommandError`] carrying the device status when it
    /// differs from `expected`.
    pub fn check_status(&self, expected: u8) -> Result<()> {
        if self.status != expected {
            return Err(Error::CommandError {
                status: self.status,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("opcode", &self.opcode)
            .field("status", &format!("0x{:02X}", self.status))
            .field("payload", &hex_str(&self.payload))
            .finish()
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Response[{}](status={}, len={})",
            self.opcode,
            self.status,
            self.payload.len()
        )
    }
}

/// Render bytes as uppercase space-separated hex pairs
///
/// ```
/// use rftoken_core::frame::hex_str;
///
/// assert_eq!(hex_str(&[0xAA, 0xDD, 0x00]), "AA DD 00");
/// ```
pub fn hex_str(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn reply(opcode: Opcode, status: u8, data: &[u8], trailing: u8) -> BytesMut {
        let mut buf = BytesMut::new();
        buf.put_slice(&PREAMBLE);
        buf.put_u8((OPCODE_SIZE + 1 + data.len() + 1) as u8);
        buf.put_u16(opcode.into());
        buf.put_u8(status);
        buf.put_slice(data);
        buf.put_u8(trailing);
        buf
    }

    #[test]
    fn test_encode_get_info() {
        let frame = Frame::new(Opcode::GetInfo);
        assert_eq!(
            frame.encode().as_ref(),
            [0xAA, 0xDD, 0x00, 0x03, 0x01, 0x02, 0x03]
        );
    }

    #[test]
    fn test_encode_beep() {
        let frame = Frame::with_payload(Opcode::Beep, vec![0x05]).unwrap();
        assert_eq!(
            frame.encode().as_ref(),
            [0xAA, 0xDD, 0x00, 0x04, 0x01, 0x03, 0x05, 0x07]
        );
    }

    #[test]
    fn test_encode_write_reserve() {
        let payload = vec![0x00, 0x56, 0x5A, 0x9F, 0xEA, 0xC9];
        let frame = Frame::with_payload(Opcode::WriteTagReserve, payload).unwrap();
        assert_eq!(
            frame.encode().as_ref(),
            [0xAA, 0xDD, 0x00, 0x09, 0x03, 0x0C, 0x00, 0x56, 0x5A, 0x9F, 0xEA, 0xC9, 0xBF]
        );
    }

    #[test]
    fn test_payload_size_limit() {
        let frame = Frame::with_payload(Opcode::WriteTag, vec![0u8; MAX_PAYLOAD_SIZE]);
        assert!(frame.is_ok());

        let result = Frame::with_payload(Opcode::WriteTag, vec![0u8; MAX_PAYLOAD_SIZE + 1]);
        assert!(matches!(
            result,
            Err(Error::PayloadTooLarge { size: 253, max: 252 })
        ));
    }

    #[test]
    fn test_decode_status_only_reply() {
        let buf = reply(Opcode::Beep, 0x00, &[], 0x02);
        let response = Response::decode(Opcode::Beep, buf).unwrap();

        assert!(response.is_ok());
        assert_eq!(response.payload.len(), 0);
    }

    #[test]
    fn test_decode_too_short() {
        let buf = BytesMut::from(&[0xAA, 0xDD, 0x00][..]);
        let result = Response::decode(Opcode::GetInfo, buf);
        assert!(matches!(result, Err(Error::BadLength { .. })));
    }

    #[test]
    fn test_decode_length_mismatch() {
        // Declared length 5, actual remainder is 2.
        let buf = BytesMut::from(&[0xAA, 0xDD, 0x00, 0x05, 0x01, 0x02][..]);
        let result = Response::decode(Opcode::GetInfo, buf);
        assert!(matches!(result, Err(Error::BadLength { .. })));
    }

    #[test]
    fn test_decode_bad_preamble() {
        let mut buf = reply(Opcode::Beep, 0x00, &[], 0x02);
        buf[0] = 0xAB;
        let result = Response::decode(Opcode::Beep, buf);
        assert!(matches!(result, Err(Error::BadFormat { .. })));
    }

    #[test]
    fn test_decode_opcode_echo_mismatch() {
        // Reply echoes CMD_BEEP when CMD_GET_INFO was sent.
        let buf = reply(Opcode::Beep, 0x00, &[], 0x02);
        let result = Response::decode(Opcode::GetInfo, buf);
        assert!(matches!(result, Err(Error::BadFormat { .. })));
    }

    #[test]
    fn test_decode_truncated_before_status() {
        // Internally consistent, but nothing after the opcode echo.
        let buf = BytesMut::from(&[0xAA, 0xDD, 0x00, 0x02, 0x01, 0x0C][..]);
        let result = Response::decode(Opcode::ReadTag, buf);
        assert!(matches!(result, Err(Error::BadLength { .. })));
    }

    #[test]
    fn test_decode_read_tag_token_window() {
        // Token replies carry a reserved byte before the id; the generic
        // window would include it, the token window must not.
        let data = [0x02, 0x56, 0x5A, 0x9F, 0xEA, 0xC9];
        let buf = reply(Opcode::ReadTag, 0x00, &data, 0x00);
        let response = Response::decode(Opcode::ReadTag, buf).unwrap();

        assert_eq!(response.payload.as_ref(), [0x56, 0x5A, 0x9F, 0xEA, 0xC9]);
    }

    #[test]
    fn test_decode_does_not_verify_trailing_byte() {
        let buf = reply(Opcode::Beep, 0x00, &[], 0xFF);
        assert!(Response::decode(Opcode::Beep, buf).is_ok());
    }

    #[test]
    fn test_check_status() {
        let buf = reply(Opcode::SetLed, 0x03, &[], 0x04);
        let response = Response::decode(Opcode::SetLed, buf).unwrap();

        assert!(!response.is_ok());
        let result = response.check_status(ERR_NONE);
        assert!(matches!(result, Err(Error::CommandError { status: 3 })));
    }

    #[test]
    fn test_hex_str() {
        assert_eq!(hex_str(&[]), "");
        assert_eq!(hex_str(&[0x0A, 0xFF, 0x00]), "0A FF 00");
    }

    proptest! {
        #[test]
        fn prop_decode_recovers_simulated_reply(
            data in proptest::collection::vec(any::<u8>(), 0..=200),
            status in any::<u8>(),
        ) {
            let buf = reply(Opcode::GetInfo, status, &data, 0x00);
            let response = Response::decode(Opcode::GetInfo, buf).unwrap();

            prop_assert_eq!(response.status, status);
            prop_assert_eq!(response.payload.as_ref(), data.as_slice());
        }

        #[test]
        fn prop_encode_length_and_checksum_consistent(
            payload in proptest::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD_SIZE),
        ) {
            let frame = Frame::with_payload(Opcode::WriteTag, payload.clone()).unwrap();
            let encoded = frame.encode();

            prop_assert_eq!(encoded.len(), frame.size());
            prop_assert_eq!(encoded[3] as usize, OPCODE_SIZE + payload.len() + 1);
            prop_assert_eq!(
                encoded[encoded.len() - 1],
                checksum::calculate(Opcode::WriteTag, &payload)
            );
        }
    }
}
