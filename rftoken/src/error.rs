//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] rftoken_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] rftoken_transport::Error),

    #[error("Type error: {0}")]
    Types(#[from] rftoken_types::Error),

    #[error("Device not connected")]
    NotConnected,

    #[error("operation timed out")]
    Timeout,
}
