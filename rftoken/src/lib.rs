//! # rftoken
//!
//! Rust implementation of the serial command protocol spoken by a family
//! of RFID token reader/writer modules.
//!
//! ## Features
//!
//! - Type-safe frame encoding and reply validation
//! - Async/await API using Tokio
//! - Comprehensive error handling
//! - The full reader command set (info, beep, LED, read, write)
//!
//! ## Quick Start
//!
//! ```no_run
//! use rftoken::Device;
//!
//! #[tokio::main]
//! async fn main() -> rftoken::Result<()> {
//!     // Open the reader
//!     let mut device = Device::new("/dev/ttyUSB0", 38_400);
//!     device.connect().await?;
//!
//!     // Poll for a token
//!     match device.read_token().await? {
//!         Some(token) => println!("Token: {token}"),
//!         None => println!("No card present"),
//!     }
//!
//!     device.disconnect().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod error;

// Re-exports
pub use device::Device;
pub use error::{Error, Result};

// Re-export types
pub use rftoken_core::constants::LedColor;
pub use rftoken_core::{Frame, Opcode, Response, Session};
pub use rftoken_types::{DeviceInfo, TokenId};
