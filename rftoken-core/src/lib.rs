//! # rftoken-core
//!
//! Core protocol implementation for serial RFID token readers.
//!
//! This crate provides the low-level protocol primitives:
//! - Frame structure and encoding/decoding
//! - Checksum calculation
//! - Opcode definitions
//! - Protocol constants

pub mod checksum;
pub mod command;
pub mod constants;
pub mod error;
pub mod frame;
pub mod session;

pub use command::Opcode;
pub use error::{Error, Result};
pub use frame::{Frame, Response};
pub use session::{DeviceState, Session};

/// Protocol version information
pub const PROTOCOL_VERSION: &str = "1.0";
