//! Generate and extract operations over the two codecs
//!
//! [`ConfigBlockService::generate`] turns a text document into a block ready
//! to be written to device storage. [`ConfigBlockService::extract`] turns a
//! block read back from a device into a text document. An erased or damaged
//! block is expected on fresh hardware, so extraction falls back to the
//! default document in that case. A block from another schema version is
//! always reported.
//!
//! ## Example
//!
//! ```
//! use cfconfig_core::ConfigBlockService;
//!
//! let service = ConfigBlockService::new();
//!
//! // Erased storage reads back as zeros
//! let text = service.extract(&[0u8; 16])?;
//! assert!(text.contains("channel= 100"));
//!
//! let block = service.generate(&text)?;
//! assert_eq!(&block[..4], b"0xBC");
//! # Ok::<(), cfconfig_core::Error>(())
//! ```

use crate::binary::BinaryCodec;
use crate::config::ServiceConfig;
use crate::error::{CorruptReason, Error, Result};
use crate::layout::BLOCK_LEN;
use crate::record::ConfigRecord;
use crate::text::TextCodec;
use std::io::{Read, Write};

/// Where extracted text came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExtractionOrigin {
    /// Decoded from a valid block
    Block(ConfigRecord),
    /// Block was corrupt; the default document was used
    Default(CorruptReason),
}

/// Result of [`ConfigBlockService::extract_detailed`]
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Text document
    pub text: String,
    /// Where it came from
    pub origin: ExtractionOrigin,
}

impl Extraction {
    /// Whether the default document was substituted
    pub fn is_default(&self) -> bool {
        matches!(self.origin, ExtractionOrigin::Default(_))
    }
}

/// Stateless façade over [`BinaryCodec`] and [`TextCodec`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigBlockService {
    config: ServiceConfig,
    binary: BinaryCodec,
    text: TextCodec,
}

impl ConfigBlockService {
    /// Create a service with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service with custom configuration
    pub fn with_config(config: ServiceConfig) -> Self {
        Self {
            config,
            binary: BinaryCodec::with_layout(config.layout),
            text: TextCodec::with_layout(config.layout),
        }
    }

    /// Get the current configuration
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Parse a text document and frame it as a block
    pub fn generate(&self, text: &str) -> Result<[u8; BLOCK_LEN]> {
        let record = self.text.read(text)?;
        if self.config.strict {
            record.validate()?;
        }
        Ok(self.binary.encode(&record))
    }

    /// Decode a block into a text document
    ///
    /// A corrupt block yields the default document unless fallback is
    /// disabled.
    pub fn extract(&self, blob: &[u8]) -> Result<String> {
        self.extract_detailed(blob).map(|e| e.text)
    }

    /// Like [`extract`](Self::extract), also reporting where the text came from
    pub fn extract_detailed(&self, blob: &[u8]) -> Result<Extraction> {
        match self.binary.decode(blob) {
            Ok(record) => Ok(Extraction {
                text: self.text.write(&record),
                origin: ExtractionOrigin::Block(record),
            }),
            Err(Error::CorruptBlock(reason)) if self.config.fallback_to_default => {
                tracing::warn!(
                    "Config block erased or altered ({}), using default configuration",
                    reason
                );
                Ok(Extraction {
                    text: self.text.default_text().to_string(),
                    origin: ExtractionOrigin::Default(reason),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Read one block's worth of bytes from storage and extract it
    pub fn extract_from<R: Read + ?Sized>(&self, reader: &mut R) -> Result<Extraction> {
        let mut buf = [0u8; BLOCK_LEN];
        let n = read_full(reader, &mut buf)?;
        tracing::debug!("Read {} bytes of config block from storage", n);
        self.extract_detailed(&buf[..n])
    }

    /// Generate a block and write it to storage
    ///
    /// Nothing is written when the text does not parse.
    pub fn generate_into<W: Write + ?Sized>(&self, text: &str, writer: &mut W) -> Result<()> {
        let block = self.generate(text)?;
        writer.write_all(&block)?;
        writer.flush()?;
        tracing::debug!("Wrote {} byte config block to storage", block.len());
        Ok(())
    }
}

/// Read as much as possible into buffer
fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::Io(e)),
        }
    }
    Ok(total)
}
