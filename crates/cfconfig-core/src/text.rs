//! Human-editable text form of the configuration block
//!
//! The document is INI-style with two sections:
//!
//! ```ini
//! [radio]
//! channel= 100
//! speed= 2M
//!
//! [calib]
//! pitchTrim= 0.0
//! rollTrim= 0.0
//! ```
//!
//! Full-line `#` and `;` comments are allowed, keys may be separated from
//! their value by `=` or `:`, and key names are case-insensitive. Unknown
//! sections and keys are ignored.

use crate::error::{Error, Result};
use crate::layout::RecordLayout;
use crate::record::{ConfigRecord, RadioSpeed};

/// Radio section name
pub const RADIO_SECTION: &str = "radio";

/// Calibration section name
pub const CALIB_SECTION: &str = "calib";

/// Radio channel key
pub const CHANNEL_KEY: &str = "channel";

/// Radio speed key
pub const SPEED_KEY: &str = "speed";

/// Pitch trim key
pub const PITCH_TRIM_KEY: &str = "pitchTrim";

/// Roll trim key
pub const ROLL_TRIM_KEY: &str = "rollTrim";

/// Document emitted when there is no valid block to extract from
pub const DEFAULT_TEXT: &str = "#Crazyflie config block
#Default configuration
[radio]
channel= 100
speed= 2M

[calib]
pitchTrim= 0.0
rollTrim= 0.0
";

/// Converts records to and from the text document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextCodec {
    layout: RecordLayout,
}

impl TextCodec {
    /// Codec for the layout compiled into this build
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec stamping parsed records with a specific layout's version
    pub fn with_layout(layout: RecordLayout) -> Self {
        Self { layout }
    }

    /// Render a record as a text document
    pub fn write(&self, record: &ConfigRecord) -> String {
        format!(
            "#Crazyflie config block\n\
             #Block version {} extracted from copter\n\
             [{RADIO_SECTION}]\n\
             {CHANNEL_KEY}= {}\n\
             {SPEED_KEY}= {}\n\
             \n\
             [{CALIB_SECTION}]\n\
             {PITCH_TRIM_KEY}= {}\n\
             {ROLL_TRIM_KEY}= {}\n",
            record.version,
            record.radio_channel,
            record.radio_speed,
            format_trim(record.pitch_trim),
            format_trim(record.roll_trim),
        )
    }

    /// Parse a text document into a record
    pub fn read(&self, text: &str) -> Result<ConfigRecord> {
        let doc = IniDocument::parse(text)?;

        let channel = doc.get(RADIO_SECTION, CHANNEL_KEY)?;
        let radio_channel = channel.parse::<u8>().map_err(|e| {
            Error::malformed(
                RADIO_SECTION,
                CHANNEL_KEY,
                format!("'{channel}' is not a channel number: {e}"),
            )
        })?;

        let radio_speed = doc
            .get(RADIO_SECTION, SPEED_KEY)?
            .parse::<RadioSpeed>()
            .map_err(|e| Error::malformed(RADIO_SECTION, SPEED_KEY, e.to_string()))?;

        let record = ConfigRecord {
            version: self.layout.version,
            radio_channel,
            radio_speed,
            pitch_trim: parse_trim(&doc, PITCH_TRIM_KEY)?,
            roll_trim: parse_trim(&doc, ROLL_TRIM_KEY)?,
        };

        tracing::debug!("Parsed config text: {:?}", record);
        Ok(record)
    }

    /// Fallback document: channel 100, 2M, zero trims
    pub fn default_text(&self) -> &'static str {
        DEFAULT_TEXT
    }

    /// Record equivalent of [`DEFAULT_TEXT`]
    pub fn default_record(&self) -> ConfigRecord {
        ConfigRecord {
            version: self.layout.version,
            radio_channel: 100,
            radio_speed: RadioSpeed::Speed2M,
            pitch_trim: 0.0,
            roll_trim: 0.0,
        }
    }
}

/// Shortest decimal that reads back to the same `f32`, whole numbers keep `.0`
fn format_trim(value: f32) -> String {
    let mut text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    text
}

fn parse_trim(doc: &IniDocument<'_>, key: &str) -> Result<f32> {
    let value = doc.get(CALIB_SECTION, key)?;
    value.parse::<f32>().map_err(|e| {
        Error::malformed(
            CALIB_SECTION,
            key,
            format!("'{value}' is not a number: {e}"),
        )
    })
}

// ============================================================================
// INI parsing
// ============================================================================

/// A parsed key/value entry
#[derive(Debug)]
struct Entry<'a> {
    /// Lowercased key
    key: String,
    value: &'a str,
}

#[derive(Debug)]
struct Section<'a> {
    name: &'a str,
    entries: Vec<Entry<'a>>,
}

/// Minimal INI document, borrowing values from the source text
#[derive(Debug, Default)]
struct IniDocument<'a> {
    sections: Vec<Section<'a>>,
}

impl<'a> IniDocument<'a> {
    fn parse(text: &'a str) -> Result<Self> {
        let mut doc = IniDocument::default();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let name = rest
                    .strip_suffix(']')
                    .ok_or_else(|| malformed_line(line_no, "unterminated section header"))?
                    .trim();
                if name.is_empty() {
                    return Err(malformed_line(line_no, "empty section name"));
                }
                if doc.sections.iter().any(|s| s.name == name) {
                    return Err(malformed_line(
                        line_no,
                        format!("duplicate section [{name}]"),
                    ));
                }
                doc.sections.push(Section {
                    name,
                    entries: Vec::new(),
                });
                continue;
            }

            let split = line.find(|c: char| c == '=' || c == ':').ok_or_else(|| {
                malformed_line(line_no, format!("expected 'key= value', got '{line}'"))
            })?;
            let key = line[..split].trim().to_lowercase();
            let value = line[split + 1..].trim();
            if key.is_empty() {
                return Err(malformed_line(line_no, "missing key name"));
            }

            let section = doc.sections.last_mut().ok_or_else(|| {
                malformed_line(line_no, format!("key '{key}' outside of any section"))
            })?;
            if section.entries.iter().any(|e| e.key == key) {
                return Err(malformed_line(
                    line_no,
                    format!("duplicate key '{key}' in [{}]", section.name),
                ));
            }
            section.entries.push(Entry { key, value });
        }

        Ok(doc)
    }

    fn get(&self, section: &str, key: &str) -> Result<&'a str> {
        let entries = &self
            .sections
            .iter()
            .find(|s| s.name == section)
            .ok_or_else(|| Error::malformed(section, key, "missing section"))?
            .entries;

        let wanted = key.to_lowercase();
        entries
            .iter()
            .find(|e| e.key == wanted)
            .map(|e| e.value)
            .ok_or_else(|| Error::malformed(section, key, "missing key"))
    }
}

fn malformed_line(line: usize, reason: impl Into<String>) -> Error {
    Error::MalformedLine {
        line,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
[radio]
channel= 42
speed= 1M

[calib]
pitchTrim= 1.5
rollTrim= -0.25
";

    #[test]
    fn test_read_sample() {
        let record = TextCodec::new().read(SAMPLE).unwrap();
        assert_eq!(record.version, 0);
        assert_eq!(record.radio_channel, 42);
        assert_eq!(record.radio_speed, RadioSpeed::Speed1M);
        assert_eq!(record.pitch_trim, 1.5);
        assert_eq!(record.roll_trim, -0.25);
    }

    #[test]
    fn test_read_default_text() {
        let codec = TextCodec::new();
        assert_eq!(codec.read(DEFAULT_TEXT).unwrap(), codec.default_record());
    }

    #[test]
    fn test_write_format() {
        let codec = TextCodec::new();
        let text = codec.write(&codec.read(SAMPLE).unwrap());
        assert_eq!(
            text,
            "#Crazyflie config block\n\
             #Block version 0 extracted from copter\n\
             [radio]\n\
             channel= 42\n\
             speed= 1M\n\
             \n\
             [calib]\n\
             pitchTrim= 1.5\n\
             rollTrim= -0.25\n"
        );
    }

    #[test]
    fn test_write_then_read() {
        let codec = TextCodec::new();
        let record = codec.read(SAMPLE).unwrap();
        assert_eq!(codec.read(&codec.write(&record)).unwrap(), record);
    }

    #[test]
    fn test_write_trims_exact() {
        assert_eq!(format_trim(0.0), "0.0");
        assert_eq!(format_trim(-3.0), "-3.0");
        assert_eq!(format_trim(0.1234567), "0.1234567");
        assert_eq!(format_trim(1e-7), "0.0000001");
        assert_eq!(format_trim(f32::INFINITY), "inf");

        let codec = TextCodec::new();
        let record = codec
            .read(&SAMPLE.replace("1.5", "0.1234567").replace("-0.25", "0.0000001"))
            .unwrap();
        let reread = codec.read(&codec.write(&record)).unwrap();
        assert_eq!(reread.pitch_trim.to_bits(), 0.1234567f32.to_bits());
        assert_eq!(reread.roll_trim.to_bits(), 1e-7f32.to_bits());
    }

    #[test]
    fn test_read_lenient_syntax() {
        let text = "\
; comment
# another comment
[radio]
  CHANNEL : 7
Speed=250k
[extra]
ignored = yes
[calib]
pitchtrim=0
ROLLTRIM = 2.5
";
        let record = TextCodec::new().read(text).unwrap();
        assert_eq!(record.radio_channel, 7);
        assert_eq!(record.radio_speed, RadioSpeed::Speed250K);
        assert_eq!(record.pitch_trim, 0.0);
        assert_eq!(record.roll_trim, 2.5);
    }

    #[test]
    fn test_read_unknown_speed() {
        let err = TextCodec::new()
            .read(&SAMPLE.replace("1M", "3M"))
            .unwrap_err();
        assert!(err.is_malformed_text());
        match err {
            Error::MalformedText { section, key, .. } => {
                assert_eq!(section, "radio");
                assert_eq!(key, "speed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_missing_section() {
        let text = "[radio]\nchannel= 1\nspeed= 2M\n";
        let err = TextCodec::new().read(text).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedText { ref section, ref reason, .. }
                if section == "calib" && reason == "missing section"
        ));
    }

    #[test]
    fn test_read_missing_key() {
        let err = TextCodec::new()
            .read(&SAMPLE.replace("rollTrim= -0.25\n", ""))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedText { ref key, ref reason, .. }
                if key == "rollTrim" && reason == "missing key"
        ));
    }

    #[test]
    fn test_read_bad_numbers() {
        let codec = TextCodec::new();
        for bad in ["channel= 256", "channel= -1", "channel= ten", "channel= "] {
            let err = codec
                .read(&SAMPLE.replace("channel= 42", bad))
                .unwrap_err();
            assert!(
                matches!(err, Error::MalformedText { ref key, .. } if key == "channel"),
                "{bad} gave {err:?}"
            );
        }

        let err = codec
            .read(&SAMPLE.replace("1.5", "level"))
            .unwrap_err();
        assert!(matches!(err, Error::MalformedText { ref key, .. } if key == "pitchTrim"));
    }

    #[test]
    fn test_read_malformed_lines() {
        let codec = TextCodec::new();

        let err = codec.read("channel= 1\n[radio]\n").unwrap_err();
        assert!(matches!(err, Error::MalformedLine { line: 1, .. }));

        let err = codec.read("[radio\nchannel= 1\n").unwrap_err();
        assert!(matches!(err, Error::MalformedLine { line: 1, .. }));

        let err = codec.read("[radio]\njust words\n").unwrap_err();
        assert!(matches!(err, Error::MalformedLine { line: 2, .. }));

        let err = codec.read("[radio]\n= 5\n").unwrap_err();
        assert!(matches!(err, Error::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn test_read_duplicates() {
        let codec = TextCodec::new();

        let err = codec
            .read("[radio]\nchannel= 1\nChannel= 2\n")
            .unwrap_err();
        assert!(matches!(err, Error::MalformedLine { line: 3, .. }));

        let err = codec.read(&format!("{SAMPLE}[radio]\n")).unwrap_err();
        assert!(matches!(err, Error::MalformedLine { .. }));
    }

    #[test]
    fn test_read_stamps_layout_version() {
        let codec = TextCodec::with_layout(RecordLayout::with_version(3));
        assert_eq!(codec.read(SAMPLE).unwrap().version, 3);
        assert_eq!(codec.default_record().version, 3);
    }

    #[test]
    fn test_default_text_content() {
        let text = TextCodec::new().default_text();
        assert!(text.contains("channel= 100"));
        assert!(text.contains("speed= 2M"));
        assert!(text.contains("pitchTrim= 0.0"));
        assert!(text.contains("rollTrim= 0.0"));
    }
}
