//! Binary framing of the configuration block
//!
//! [`BinaryCodec::encode`] lays a [`ConfigRecord`] out as magic marker, fixed
//! fields and a trailing checksum byte. [`BinaryCodec::decode`] validates and
//! reverses it, reporting any problem as [`Error::CorruptBlock`] or
//! [`Error::UnsupportedVersion`]. The codec never substitutes defaults itself.
//!
//! ## Example
//!
//! ```
//! use cfconfig_core::{BinaryCodec, ConfigRecord, RadioSpeed};
//!
//! let codec = BinaryCodec::new();
//! let record = ConfigRecord {
//!     version: 0,
//!     radio_channel: 80,
//!     radio_speed: RadioSpeed::Speed250K,
//!     pitch_trim: 0.5,
//!     roll_trim: -1.0,
//! };
//!
//! let block = codec.encode(&record);
//! assert_eq!(block.len(), 16);
//! assert_eq!(codec.decode(&block)?, record);
//! # Ok::<(), cfconfig_core::Error>(())
//! ```

use crate::checksum;
use crate::error::{CorruptReason, Error, Result};
use crate::layout::{
    FieldSpec, RecordLayout, BLOCK_LEN, CHANNEL_FIELD, CHECKSUM_OFFSET, MAGIC_LEN,
    PITCH_TRIM_FIELD, ROLL_TRIM_FIELD, SPEED_FIELD, VERSION_FIELD,
};
use crate::record::{ConfigRecord, RadioSpeed};
use serde::Serialize;

/// Encoder/decoder for the framed binary block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinaryCodec {
    layout: RecordLayout,
}

impl BinaryCodec {
    /// Codec for the layout compiled into this build
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec for a specific layout
    pub fn with_layout(layout: RecordLayout) -> Self {
        Self { layout }
    }

    /// Layout in use
    pub fn layout(&self) -> RecordLayout {
        self.layout
    }

    /// Frame a record into a block
    ///
    /// The record's own `version` is written as-is. Range checks on the
    /// record are the caller's business.
    pub fn encode(&self, record: &ConfigRecord) -> [u8; BLOCK_LEN] {
        let mut block = [0u8; BLOCK_LEN];

        block[..MAGIC_LEN].copy_from_slice(&self.layout.magic);
        block[VERSION_FIELD.offset] = record.version;
        block[CHANNEL_FIELD.offset] = record.radio_channel;
        block[SPEED_FIELD.offset] = record.radio_speed.index();
        block[PITCH_TRIM_FIELD.range()].copy_from_slice(&record.pitch_trim.to_le_bytes());
        block[ROLL_TRIM_FIELD.range()].copy_from_slice(&record.roll_trim.to_le_bytes());
        block[CHECKSUM_OFFSET] = checksum::complement(&block[..CHECKSUM_OFFSET]);

        block
    }

    /// Validate a block and parse the record out of it
    ///
    /// Bytes past the framed block are ignored, so a whole device storage
    /// region can be passed in.
    pub fn decode(&self, blob: &[u8]) -> Result<ConfigRecord> {
        let block = self.validate_frame(blob)?;

        let version = block[VERSION_FIELD.offset];
        if version != self.layout.version {
            return Err(Error::UnsupportedVersion {
                found: version,
                expected: self.layout.version,
            });
        }

        let speed_index = block[SPEED_FIELD.offset];
        let radio_speed = RadioSpeed::from_index(speed_index).ok_or(Error::CorruptBlock(
            CorruptReason::InvalidSpeedIndex(speed_index),
        ))?;

        let record = ConfigRecord {
            version,
            radio_channel: block[CHANNEL_FIELD.offset],
            radio_speed,
            pitch_trim: read_f32(block, PITCH_TRIM_FIELD),
            roll_trim: read_f32(block, ROLL_TRIM_FIELD),
        };

        tracing::debug!("Decoded config block: {:?}", record);
        Ok(record)
    }

    /// Describe a block without failing, for diagnostics
    pub fn inspect(&self, blob: &[u8]) -> BlockReport {
        let magic = blob.get(..MAGIC_LEN).map(bytes_to_hex);
        let magic_ok = blob.get(..MAGIC_LEN) == Some(&self.layout.magic[..]);
        let framed = blob.get(..BLOCK_LEN);

        let (record, error) = match self.decode(blob) {
            Ok(record) => (Some(record), None),
            Err(e) => (None, Some(e.to_string())),
        };

        BlockReport {
            length: blob.len(),
            magic,
            magic_ok,
            checksum_sum: framed.map(checksum::checksum256),
            stored_checksum: blob.get(CHECKSUM_OFFSET).copied(),
            version: blob.get(VERSION_FIELD.offset).copied(),
            expected_version: self.layout.version,
            record,
            error,
        }
    }

    /// Length, magic and checksum checks, in that order
    fn validate_frame<'a>(&self, blob: &'a [u8]) -> Result<&'a [u8]> {
        if blob.len() < BLOCK_LEN {
            tracing::debug!("Config block too short: {} bytes", blob.len());
            return Err(Error::CorruptBlock(CorruptReason::TooShort {
                expected: BLOCK_LEN,
                actual: blob.len(),
            }));
        }
        let block = &blob[..BLOCK_LEN];

        if block[..MAGIC_LEN] != self.layout.magic {
            let mut found = [0u8; MAGIC_LEN];
            found.copy_from_slice(&block[..MAGIC_LEN]);
            tracing::debug!("Config block magic mismatch: {}", bytes_to_hex(&found));
            return Err(Error::CorruptBlock(CorruptReason::BadMagic { found }));
        }

        if !checksum::is_valid(block) {
            let sum = checksum::checksum256(block);
            tracing::debug!("Config block checksum mismatch: sum 0x{:02x}", sum);
            return Err(Error::CorruptBlock(CorruptReason::ChecksumMismatch { sum }));
        }

        Ok(block)
    }
}

/// Diagnostic view of a block, produced by [`BinaryCodec::inspect`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockReport {
    /// Number of bytes supplied
    pub length: usize,
    /// First four bytes as hex, if present
    pub magic: Option<String>,
    /// Whether the magic marker matched
    pub magic_ok: bool,
    /// Sum of the framed bytes (zero when intact)
    pub checksum_sum: Option<u8>,
    /// Checksum byte stored in the block
    pub stored_checksum: Option<u8>,
    /// Version byte stored in the block
    pub version: Option<u8>,
    /// Version this build understands
    pub expected_version: u8,
    /// Decoded record, when the block is valid
    pub record: Option<ConfigRecord>,
    /// Decode error, when the block is not valid
    pub error: Option<String>,
}

impl BlockReport {
    /// Whether the block decoded cleanly
    pub fn is_valid(&self) -> bool {
        self.record.is_some()
    }
}

fn read_f32(block: &[u8], field: FieldSpec) -> f32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&block[field.range()]);
    f32::from_le_bytes(buf)
}

/// Convert bytes to a spaced hex string
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
