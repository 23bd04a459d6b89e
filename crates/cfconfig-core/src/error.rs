//! Error types for the cfconfig core library

use crate::binary::bytes_to_hex;
use thiserror::Error;

/// Why a binary block was rejected as corrupt
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorruptReason {
    /// Block is shorter than the framed record
    #[error("block too short: expected {expected} bytes, got {actual}")]
    TooShort {
        /// Required length in bytes
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// First four bytes are not the magic marker
    #[error("bad magic marker: {}", bytes_to_hex(.found))]
    BadMagic {
        /// Bytes found where the marker should be
        found: [u8; 4],
    },

    /// Sum of the framed bytes is not zero modulo 256
    #[error("checksum mismatch: block sums to 0x{sum:02x}, expected 0x00")]
    ChecksumMismatch {
        /// Sum of the framed bytes modulo 256
        sum: u8,
    },

    /// Radio speed index outside the known speeds
    #[error("invalid radio speed index {0}")]
    InvalidSpeedIndex(u8),
}

/// Main error type for cfconfig operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required section or key is missing, or a value does not parse
    #[error("Malformed config text: [{section}] {key}: {reason}")]
    MalformedText {
        /// Section the key belongs to
        section: String,
        /// Offending key
        key: String,
        /// What went wrong
        reason: String,
    },

    /// A line of the text document could not be parsed at all
    #[error("Malformed config text at line {line}: {reason}")]
    MalformedLine {
        /// One-based line number
        line: usize,
        /// What went wrong
        reason: String,
    },

    /// Binary block is erased, truncated or altered
    #[error("Corrupt config block: {0}")]
    CorruptBlock(CorruptReason),

    /// Block is intact but was written by a different schema version
    #[error("Unsupported config block version {found} (this build understands version {expected})")]
    UnsupportedVersion {
        /// Version byte found in the block
        found: u8,
        /// Version this build was compiled for
        expected: u8,
    },

    /// Record holds values outside their valid range
    #[error("Invalid config record: {0}")]
    InvalidRecord(String),

    /// IO error while reading or writing a block
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a [`Error::MalformedText`] for a section/key pair
    pub fn malformed(section: &str, key: &str, reason: impl Into<String>) -> Self {
        Error::MalformedText {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error means the text document could not be understood
    pub fn is_malformed_text(&self) -> bool {
        matches!(
            self,
            Error::MalformedText { .. } | Error::MalformedLine { .. }
        )
    }

    /// Whether this error means the binary block failed validation
    pub fn is_corrupt_block(&self) -> bool {
        matches!(self, Error::CorruptBlock(_))
    }
}

/// Result type alias using the cfconfig error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::malformed("radio", "speed", "unknown speed '3M'");
        let msg = err.to_string();
        assert!(msg.contains("[radio]"));
        assert!(msg.contains("speed"));
        assert!(msg.contains("3M"));

        let err = Error::UnsupportedVersion {
            found: 3,
            expected: 0,
        };
        assert!(err.to_string().contains("version 3"));
        assert!(err.to_string().contains("version 0"));
    }

    #[test]
    fn test_corrupt_reason_display() {
        let err = Error::CorruptBlock(CorruptReason::TooShort {
            expected: 16,
            actual: 4,
        });
        assert!(err.to_string().contains("16"));
        assert!(err.to_string().contains('4'));

        let err = Error::CorruptBlock(CorruptReason::BadMagic { found: [0; 4] });
        assert!(err.to_string().contains("00 00 00 00"));

        let err = Error::CorruptBlock(CorruptReason::ChecksumMismatch { sum: 0x2a });
        assert!(err.to_string().contains("0x2a"));

        let reason = CorruptReason::BadMagic { found: *b"0xBD" };
        assert_eq!(reason.to_string(), "bad magic marker: 30 78 42 44");
        assert_eq!(
            CorruptReason::InvalidSpeedIndex(7).to_string(),
            "invalid radio speed index 7"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::malformed("calib", "rollTrim", "missing").is_malformed_text());
        assert!(Error::MalformedLine {
            line: 3,
            reason: "garbage".to_string()
        }
        .is_malformed_text());
        assert!(Error::CorruptBlock(CorruptReason::InvalidSpeedIndex(7)).is_corrupt_block());
        assert!(!Error::UnsupportedVersion {
            found: 1,
            expected: 0
        }
        .is_corrupt_block());
    }
}
