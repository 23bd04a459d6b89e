//! # cfconfig Core
//!
//! Core library for the Crazyflie configuration block: a 16-byte record in
//! device storage holding the radio channel, radio speed and pitch/roll trims.
//!
//! ## Modules
//!
//! - `checksum`: 8-bit additive checksum
//! - `layout`: Field order, widths, magic marker and schema version
//! - `record`: The configuration record and radio speed type
//! - `binary`: Framing and validation of the binary block
//! - `text`: INI-style text document
//! - `service`: Generate/extract operations with default fallback
//! - `error`: Error types and result aliases
//! - `config`: Runtime configuration
//! - `settings`: Persistent user settings from configuration file
//!
//! ## Example
//!
//! ```
//! use cfconfig_core::ConfigBlockService;
//!
//! let service = ConfigBlockService::new();
//! let text = "[radio]\nchannel= 80\nspeed= 250K\n\n[calib]\npitchTrim= 0.0\nrollTrim= 1.0\n";
//!
//! let block = service.generate(text)?;
//! let extracted = service.extract(&block)?;
//! assert!(extracted.contains("channel= 80"));
//! assert!(extracted.contains("speed= 250K"));
//! # Ok::<(), cfconfig_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod binary;
pub mod checksum;
pub mod config;
pub mod error;
pub mod layout;
pub mod record;
pub mod service;
pub mod settings;
pub mod text;

pub use binary::{BinaryCodec, BlockReport};
pub use config::ServiceConfig;
pub use error::{CorruptReason, Error, Result};
pub use layout::{RecordLayout, BLOCK_LEN, CONFIG_VERSION, MAGIC};
pub use record::{ConfigRecord, RadioSpeed, UnknownSpeed, MAX_RADIO_CHANNEL};
pub use service::{ConfigBlockService, Extraction, ExtractionOrigin};
pub use settings::{BehaviorSettings, ExtractSettings, GenerateSettings, Settings, SettingsError};
pub use text::{TextCodec, DEFAULT_TEXT};
