//! Type definitions for rftoken

pub mod device_info;
pub mod error;
pub mod token;

pub use device_info::DeviceInfo;
pub use error::{Error, Result};
pub use token::TokenId;
