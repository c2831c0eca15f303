//! Protocol constants

use std::time::Duration;

/// Frame preamble, shared by requests and responses
pub const PREAMBLE: [u8; 3] = [0xAA, 0xDD, 0x00];

/// Opcode size on the wire
pub const OPCODE_SIZE: usize = 2;

/// Maximum request payload size
pub const MAX_PAYLOAD_SIZE: usize = 252;

/// Device status code reported on success
pub const ERR_NONE: u8 = 0x00;

/// Token identifier size in bytes
pub const TOKEN_SIZE: usize = 5;

/// Default baud rate for the reader's serial link
pub const DEFAULT_BAUD: u32 = 38_400;

/// Settle delay between writing a request and each read phase
///
/// The reader does not signal when a reply is ready; the exchange waits
/// this long before polling the port.
pub const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Upper bound for the drain read that collects the rest of a reply
pub const DRAIN_READ_LIMIT: usize = 1000;

/// LED colors accepted by the set-led command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LedColor {
    Off = 0x00,
    Red = 0x01,
    Green = 0x02,
}

impl From<LedColor> for u8 {
    fn from(color: LedColor) -> u8 {
        color as u8
    }
}
