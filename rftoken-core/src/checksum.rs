//! Frame checksum
//!
//! The checksum is a single byte: the opcode and payload bytes XOR-folded
//! together. The preamble and length byte are not covered.

use tracing::trace;

use crate::command::Opcode;

/// Calculate the checksum for an outgoing frame
///
/// # Examples
///
/// ```
/// use rftoken_core::{checksum, Opcode};
///
/// // Empty payload: just the opcode bytes folded together.
/// assert_eq!(checksum::calculate(Opcode::GetInfo, &[]), 0x01 ^ 0x02);
/// ```
pub fn calculate(opcode: Opcode, payload: &[u8]) -> u8 {
    let folded = opcode
        .bytes()
        .iter()
        .chain(payload)
        .fold(0u8, |acc, b| acc ^ b);

    trace!(
        opcode = %opcode,
        payload_len = payload.len(),
        checksum = format!("0x{:02X}", folded),
        "Calculated checksum"
    );

    folded
}

/// Verify a checksum against opcode and payload
pub fn verify(opcode: Opcode, payload: &[u8], expected: u8) -> bool {
    calculate(opcode, payload) == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_info_empty() {
        assert_eq!(calculate(Opcode::GetInfo, &[]), 0x03);
    }

    #[test]
    fn test_checksum_beep_duration() {
        // 01 ^ 03 ^ 05
        assert_eq!(calculate(Opcode::Beep, &[0x05]), 0x07);
    }

    #[test]
    fn test_checksum_write_payload() {
        let payload = [0x00, 0x56, 0x5A, 0x9F, 0xEA, 0xC9];
        let expected = [0x03, 0x0C]
            .iter()
            .chain(&payload)
            .fold(0u8, |acc, b| acc ^ b);

        assert_eq!(calculate(Opcode::WriteTagReserve, &payload), expected);
    }

    #[test]
    fn test_checksum_verify() {
        let payload = [0xAB, 0xCD];
        let checksum = calculate(Opcode::WriteTag, &payload);

        assert!(verify(Opcode::WriteTag, &payload, checksum));
        assert!(!verify(Opcode::WriteTag, &payload, checksum.wrapping_add(1)));
    }

    #[test]
    fn test_checksum_differs_by_opcode() {
        assert_ne!(
            calculate(Opcode::WriteTag, &[1, 2, 3]),
            calculate(Opcode::WriteTagReserve, &[1, 2, 3])
        );
    }
}
