//! The configuration record and its radio speed type

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Highest radio channel the radio hardware can tune to
pub const MAX_RADIO_CHANNEL: u8 = 125;

/// Radio data rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RadioSpeed {
    /// 250 kbit/s
    #[serde(rename = "250K")]
    Speed250K,
    /// 1 Mbit/s
    #[serde(rename = "1M")]
    Speed1M,
    /// 2 Mbit/s
    #[serde(rename = "2M")]
    Speed2M,
}

impl RadioSpeed {
    /// Wire order of the speeds; position is the on-block index
    const ORDER: [RadioSpeed; 3] = [
        RadioSpeed::Speed250K,
        RadioSpeed::Speed1M,
        RadioSpeed::Speed2M,
    ];

    /// Text form used in the config document
    pub fn name(&self) -> &'static str {
        match self {
            RadioSpeed::Speed250K => "250K",
            RadioSpeed::Speed1M => "1M",
            RadioSpeed::Speed2M => "2M",
        }
    }

    /// Index stored in the binary block
    pub fn index(&self) -> u8 {
        match self {
            RadioSpeed::Speed250K => 0,
            RadioSpeed::Speed1M => 1,
            RadioSpeed::Speed2M => 2,
        }
    }

    /// Map a block index back to a speed
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ORDER.get(usize::from(index)).copied()
    }

    /// List all supported speeds in wire order
    pub fn all() -> &'static [RadioSpeed] {
        &Self::ORDER
    }
}

impl std::fmt::Display for RadioSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when a string is not one of the known speeds
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown radio speed '{0}' (expected 250K, 1M or 2M)")]
pub struct UnknownSpeed(pub String);

impl std::str::FromStr for RadioSpeed {
    type Err = UnknownSpeed;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ORDER
            .iter()
            .find(|speed| speed.name() == upper)
            .copied()
            .ok_or_else(|| UnknownSpeed(s.trim().to_string()))
    }
}

/// Radio and calibration settings stored in the configuration block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfigRecord {
    /// Schema version the record was written with
    pub version: u8,
    /// Radio channel (0-125)
    pub radio_channel: u8,
    /// Radio data rate
    pub radio_speed: RadioSpeed,
    /// Pitch trim in degrees
    pub pitch_trim: f32,
    /// Roll trim in degrees
    pub roll_trim: f32,
}

impl ConfigRecord {
    /// Check that the radio channel is one the hardware can use
    ///
    /// The codecs never call this; range checks are left to the caller.
    pub fn validate(&self) -> Result<()> {
        if self.radio_channel > MAX_RADIO_CHANNEL {
            return Err(Error::InvalidRecord(format!(
                "radio channel {} out of range 0-{}",
                self.radio_channel, MAX_RADIO_CHANNEL
            )));
        }
        if !self.pitch_trim.is_finite() || !self.roll_trim.is_finite() {
            return Err(Error::InvalidRecord(
                "trim values must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(channel: u8) -> ConfigRecord {
        ConfigRecord {
            version: 0,
            radio_channel: channel,
            radio_speed: RadioSpeed::Speed2M,
            pitch_trim: 0.0,
            roll_trim: 0.0,
        }
    }

    #[test]
    fn test_speed_index_mapping() {
        for (i, speed) in RadioSpeed::all().iter().enumerate() {
            assert_eq!(usize::from(speed.index()), i);
            assert_eq!(RadioSpeed::from_index(speed.index()), Some(*speed));
        }
        assert_eq!(RadioSpeed::from_index(3), None);
        assert_eq!(RadioSpeed::from_index(0xff), None);
    }

    #[test]
    fn test_speed_from_str() {
        assert_eq!("250K".parse::<RadioSpeed>(), Ok(RadioSpeed::Speed250K));
        assert_eq!("1m".parse::<RadioSpeed>(), Ok(RadioSpeed::Speed1M));
        assert_eq!(" 2M ".parse::<RadioSpeed>(), Ok(RadioSpeed::Speed2M));
        assert_eq!(
            "3M".parse::<RadioSpeed>(),
            Err(UnknownSpeed("3M".to_string()))
        );
        assert!("".parse::<RadioSpeed>().is_err());
    }

    #[test]
    fn test_speed_display() {
        assert_eq!(RadioSpeed::Speed250K.to_string(), "250K");
        assert_eq!(RadioSpeed::Speed2M.to_string(), "2M");
    }

    #[test]
    fn test_validate_channel_range() {
        assert!(record(0).validate().is_ok());
        assert!(record(MAX_RADIO_CHANNEL).validate().is_ok());
        let err = record(126).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));
        assert!(err.to_string().contains("126"));
    }

    #[test]
    fn test_validate_rejects_nan_trim() {
        let mut r = record(10);
        r.pitch_trim = f32::NAN;
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_record_json() {
        let json = serde_json::to_string(&record(100)).unwrap();
        assert!(json.contains("\"radio_channel\":100"));
        assert!(json.contains("\"2M\""));
    }
}
