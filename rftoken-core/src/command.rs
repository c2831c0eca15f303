//! Protocol opcode definitions

use std::fmt;

use crate::error::{Error, Result};

/// Protocol opcodes
///
/// The discriminant is the big-endian byte pair sent on the wire:
/// `0x0102` is transmitted as `01 02`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Opcode {
    /// Reader identification string, no request payload
    GetInfo = 0x0102,

    /// Sound the buzzer, payload is one duration byte
    Beep = 0x0103,

    /// Set the LED, payload is one color byte
    SetLed = 0x0104,

    /// Read the token in the field, no request payload
    ReadTag = 0x010C,

    /// Write a token, payload is lock byte followed by the token bytes
    WriteTag = 0x020C,

    /// Write a token's reserve page, payload as for [`Opcode::WriteTag`]
    WriteTagReserve = 0x030C,
}

impl Opcode {
    /// Wire representation, most significant byte first
    pub fn bytes(self) -> [u8; 2] {
        (self as u16).to_be_bytes()
    }

    /// Get opcode name
    pub fn name(self) -> &'static str {
        match self {
            Self::GetInfo => "CMD_GET_INFO",
            Self::Beep => "CMD_BEEP",
            Self::SetLed => "CMD_SET_LED",
            Self::ReadTag => "CMD_READ_TAG",
            Self::WriteTag => "CMD_WRITE_TAG",
            Self::WriteTagReserve => "CMD_WRITE_TAG_RESERVE",
        }
    }
}

impl From<Opcode> for u16 {
    fn from(opcode: Opcode) -> u16 {
        opcode as u16
    }
}

impl TryFrom<u16> for Opcode {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            0x0102 => Ok(Self::GetInfo),
            0x0103 => Ok(Self::Beep),
            0x0104 => Ok(Self::SetLed),
            0x010C => Ok(Self::ReadTag),
            0x020C => Ok(Self::WriteTag),
            0x030C => Ok(Self::WriteTagReserve),
            _ => Err(Error::UnknownOpcode(value)),
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:04X})", self.name(), *self as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_conversion() {
        assert_eq!(u16::from(Opcode::GetInfo), 0x0102);
        assert_eq!(Opcode::try_from(0x0102).unwrap(), Opcode::GetInfo);
        assert_eq!(Opcode::try_from(0x030C).unwrap(), Opcode::WriteTagReserve);
    }

    #[test]
    fn test_opcode_wire_bytes() {
        assert_eq!(Opcode::ReadTag.bytes(), [0x01, 0x0C]);
        assert_eq!(Opcode::WriteTag.bytes(), [0x02, 0x0C]);
    }

    #[test]
    fn test_unknown_opcode() {
        let result = Opcode::try_from(0x0405);
        assert!(matches!(result, Err(Error::UnknownOpcode(0x0405))));
    }

    #[test]
    fn test_opcode_display() {
        assert_eq!(Opcode::Beep.to_string(), "CMD_BEEP(0x0103)");
    }
}
