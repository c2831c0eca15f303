//! Error types for rftoken-core

use crate::frame::hex_str;

/// Result type alias for protocol operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request payload exceeds what the length byte can describe
    #[error("Payload too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge {
        size: usize,
        max: usize,
    },

    /// Declared reply length disagrees with the received buffer
    #[error("answer has bad length: {}", hex_str(.raw))]
    BadLength {
        raw: Vec<u8>,
    },

    /// Preamble or opcode echo mismatch
    #[error("answer has bad format: {}", hex_str(.raw))]
    BadFormat {
        raw: Vec<u8>,
    },

    /// Device answered but reported a non-zero status
    #[error("rfid command error #{status}")]
    CommandError {
        status: u8,
    },

    /// Unknown opcode value
    #[error("Unknown opcode: 0x{0:04X}")]
    UnknownOpcode(u16),
}
