//! Additive 8-bit checksum used to protect the configuration block
//!
//! A framed block is valid when the sum of all of its bytes, checksum byte
//! included, is zero modulo 256.

/// Sum of all bytes modulo 256
pub fn checksum256(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Byte that, appended to `bytes`, brings the total sum to zero
pub fn complement(bytes: &[u8]) -> u8 {
    0u8.wrapping_sub(checksum256(bytes))
}

/// Check that a framed region (checksum byte included) sums to zero
pub fn is_valid(framed: &[u8]) -> bool {
    checksum256(framed) == 0
}
