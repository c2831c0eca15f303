//! Device information

use std::borrow::Cow;
use std::fmt;

/// Identification data returned by the reader
///
/// The reader answers get-info with a short textual blob (model and
/// firmware revision); the exact layout varies between firmware builds,
/// so the raw bytes are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    raw: Vec<u8>,
}

impl DeviceInfo {
    pub fn new(raw: Vec<u8>) -> Self {
        Self { raw }
    }

    /// Raw reply bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Lossy text view of the reply
    pub fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.raw)
    }
}

impl From<Vec<u8>> for DeviceInfo {
    fn from(raw: Vec<u8>) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.as_text();
        write!(
            f,
            "{}",
            text.trim_end_matches(|c: char| c.is_whitespace() || c == '\0')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_view() {
        let info = DeviceInfo::new(b"RFID-READER v1.2\0".to_vec());
        assert_eq!(info.as_text(), "RFID-READER v1.2\0");
        assert_eq!(info.to_string(), "RFID-READER v1.2");
    }

    #[test]
    fn test_non_utf8_is_lossy() {
        let info = DeviceInfo::new(vec![0xFF, 0x52, 0x46]);
        assert!(info.as_text().contains("RF"));
    }
}
