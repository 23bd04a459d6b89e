//! Persistent user settings for cfconfig
//!
//! Settings are stored in a TOML configuration file at:
//! - Linux/macOS: `~/.config/cfconfig/cfconfig_config.toml`
//! - Windows: `%APPDATA%\cfconfig\cfconfig_config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! [generate]
//! strict = false
//!
//! [extract]
//! fallback_to_default = true
//!
//! [behavior]
//! quiet = false
//! ```

use crate::config::ServiceConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file name
const CONFIG_FILE_NAME: &str = "cfconfig_config.toml";

/// Application name for config directory
const APP_NAME: &str = "cfconfig";

/// User settings loaded from configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Generate operation settings
    pub generate: GenerateSettings,

    /// Extract operation settings
    pub extract: ExtractSettings,

    /// Behavior settings
    pub behavior: BehaviorSettings,
}

/// Settings for generating blocks
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GenerateSettings {
    /// Reject radio channels outside 0-125 and non-finite trims
    pub strict: bool,
}

/// Settings for extracting blocks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExtractSettings {
    /// Write the default document when a block is erased or corrupt
    pub fallback_to_default: bool,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            fallback_to_default: true,
        }
    }
}

/// General behavior settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BehaviorSettings {
    /// Suppress all non-error output, as `--silent` does
    pub quiet: bool,
}

impl Settings {
    /// Default settings file location, if the platform has a config directory
    pub fn config_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|p| p.join(APP_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse the settings file at `path`
    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Settings from `path`, or defaults when there is no readable file
    ///
    /// A file that exists but cannot be read or parsed is logged and ignored.
    pub fn load(path: Option<&Path>) -> Self {
        match path {
            Some(path) if path.exists() => Self::read(path).unwrap_or_else(|e| {
                tracing::warn!("{}, using default settings", e);
                Self::default()
            }),
            Some(path) => {
                tracing::debug!("No settings file at {}, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Write these settings to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let contents = toml::to_string_pretty(self).map_err(SettingsError::Serialize)?;
        std::fs::write(path, contents).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Service configuration these settings describe
    ///
    /// Command-line flags are applied on top of the returned value.
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig::new()
            .strict(self.generate.strict)
            .fallback_to_default(self.extract.fallback_to_default)
    }
}

/// Errors reading or writing the settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// File could not be read, written or its directory created
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path that caused the error
        path: PathBuf,
        /// The underlying error
        source: std::io::Error,
    },

    /// File is not valid settings TOML
    #[error("Invalid settings file {path}: {source}")]
    Parse {
        /// Offending file
        path: PathBuf,
        /// The underlying error
        source: toml::de::Error,
    },

    /// Settings could not be rendered as TOML
    #[error("Failed to serialize settings: {0}")]
    Serialize(toml::ser::Error),
}
