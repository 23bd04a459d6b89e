//! Binary layout of the configuration block
//!
//! ```text
//! offset  size  field
//!      0     4  magic ("0xBC")
//!      4     1  version
//!      5     1  radio channel
//!      6     1  radio speed index
//!      7     4  pitch trim (f32, little-endian)
//!     11     4  roll trim (f32, little-endian)
//!     15     1  checksum
//! ```
//!
//! Field order and widths are part of the wire contract. Any change needs a
//! [`CONFIG_VERSION`] bump.

// ============================================================================
// Constants
// ============================================================================

/// Marker at the start of every configuration block
pub const MAGIC: [u8; 4] = *b"0xBC";

/// Schema version written and accepted by this build
pub const CONFIG_VERSION: u8 = 0;

/// Length of the magic marker
pub const MAGIC_LEN: usize = MAGIC.len();

/// Length of the fixed-width record fields
pub const PAYLOAD_LEN: usize = 11;

/// Offset of the checksum byte
pub const CHECKSUM_OFFSET: usize = MAGIC_LEN + PAYLOAD_LEN;

/// Total framed block length
pub const BLOCK_LEN: usize = CHECKSUM_OFFSET + 1;

// ============================================================================
// Field description
// ============================================================================

/// On-wire encoding of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Unsigned byte
    U8,
    /// Unsigned byte indexing the radio speed list
    SpeedIndex,
    /// IEEE-754 single precision, little-endian
    F32Le,
}

impl FieldKind {
    /// Width on the wire in bytes
    pub const fn width(&self) -> usize {
        match self {
            FieldKind::U8 | FieldKind::SpeedIndex => 1,
            FieldKind::F32Le => 4,
        }
    }
}

/// One field of the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name
    pub name: &'static str,
    /// Encoding
    pub kind: FieldKind,
    /// Offset from the start of the block, magic included
    pub offset: usize,
}

impl FieldSpec {
    /// Byte range of the field within a framed block
    pub const fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.kind.width()
    }
}

/// Version field
pub const VERSION_FIELD: FieldSpec = FieldSpec {
    name: "version",
    kind: FieldKind::U8,
    offset: MAGIC_LEN,
};

/// Radio channel field
pub const CHANNEL_FIELD: FieldSpec = FieldSpec {
    name: "radio_channel",
    kind: FieldKind::U8,
    offset: VERSION_FIELD.offset + 1,
};

/// Radio speed index field
pub const SPEED_FIELD: FieldSpec = FieldSpec {
    name: "radio_speed_index",
    kind: FieldKind::SpeedIndex,
    offset: CHANNEL_FIELD.offset + 1,
};

/// Pitch trim field
pub const PITCH_TRIM_FIELD: FieldSpec = FieldSpec {
    name: "pitch_trim",
    kind: FieldKind::F32Le,
    offset: SPEED_FIELD.offset + 1,
};

/// Roll trim field
pub const ROLL_TRIM_FIELD: FieldSpec = FieldSpec {
    name: "roll_trim",
    kind: FieldKind::F32Le,
    offset: PITCH_TRIM_FIELD.offset + 4,
};

/// All fields in wire order
pub const FIELDS: [FieldSpec; 5] = [
    VERSION_FIELD,
    CHANNEL_FIELD,
    SPEED_FIELD,
    PITCH_TRIM_FIELD,
    ROLL_TRIM_FIELD,
];

// ============================================================================
// Layout
// ============================================================================

/// Magic marker and schema version a codec works against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    /// Expected magic marker
    pub magic: [u8; 4],
    /// Expected schema version
    pub version: u8,
}

impl Default for RecordLayout {
    fn default() -> Self {
        Self::current()
    }
}

impl RecordLayout {
    /// Layout compiled into this build
    pub const fn current() -> Self {
        Self {
            magic: MAGIC,
            version: CONFIG_VERSION,
        }
    }

    /// Current layout, but expecting a different schema version
    pub const fn with_version(version: u8) -> Self {
        Self {
            magic: MAGIC,
            version,
        }
    }

    /// Field descriptions in wire order
    pub fn fields(&self) -> &'static [FieldSpec] {
        &FIELDS
    }

    /// Framed block length
    pub const fn block_len(&self) -> usize {
        BLOCK_LEN
    }
}
