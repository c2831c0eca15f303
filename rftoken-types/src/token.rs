//! Token identifier

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The 5-byte identifier stored on a token
///
/// Displays as uppercase space-separated hex pairs, the form the reader
/// tooling has always used:
///
/// ```
/// use rftoken_types::TokenId;
///
/// let token: TokenId = "56 5A 9F EA C9".parse().unwrap();
/// assert_eq!(token.to_string(), "56 5A 9F EA C9");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenId([u8; 5]);

impl TokenId {
    /// Token identifier size in bytes
    pub const SIZE: usize = 5;

    /// Create a token id from raw bytes
    pub fn new(bytes: [u8; Self::SIZE]) -> Self {
        Self(bytes)
    }

    /// Parse a token id from hex pairs; whitespace between pairs is
    /// accepted and ignored
    pub fn from_hex(s: &str) -> Result<Self> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = hex::decode(&compact)?;
        Self::try_from(bytes.as_slice())
    }

    /// Raw bytes of the id
    pub fn as_bytes(&self) -> &[u8; Self::SIZE] {
        &self.0
    }

    /// An all-zero id, which the reader reports when nothing was read
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

impl TryFrom<&[u8]> for TokenId {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; Self::SIZE] =
            bytes
                .try_into()
                .map_err(|_| Error::InvalidTokenLength {
                    expected: Self::SIZE,
                    actual: bytes.len(),
                })?;
        Ok(Self(bytes))
    }
}

impl FromStr for TokenId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{b:02X}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenId({self})")
    }
}
