pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid token length: expected {expected} bytes, got {actual}")]
    InvalidTokenLength {
        expected: usize,
        actual: usize,
    },

    #[error("Invalid hex data: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}
