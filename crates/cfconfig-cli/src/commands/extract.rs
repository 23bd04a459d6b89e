//! Extract command - decompiles a binary block into a text configuration

use anyhow::{Context, Result};
use console::style;
use std::path::PathBuf;

use cfconfig_core::{ConfigBlockService, Error, ExtractionOrigin, ServiceConfig};

/// Arguments for the extract command
pub struct ExtractArgs {
    /// Binary block to read
    pub input: PathBuf,
    /// Text configuration to write
    pub output: PathBuf,
    /// Service policy, settings file with flag overrides applied
    pub config: ServiceConfig,
    /// Suppress output
    pub silent: bool,
}

/// Execute the extract command
pub fn execute(args: ExtractArgs) -> Result<()> {
    let data = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let service = ConfigBlockService::with_config(args.config);

    let extraction = match service.extract_detailed(&data) {
        Ok(extraction) => extraction,
        Err(e @ Error::UnsupportedVersion { .. }) => {
            return Err(anyhow::Error::new(e).context(format!(
                "Cannot extract {}: block was written by another version, update cfconfig",
                args.input.display()
            )));
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("Failed to extract {}", args.input.display())));
        }
    };

    std::fs::write(&args.output, &extraction.text)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    match extraction.origin {
        ExtractionOrigin::Block(record) => println_if!(
            args.silent,
            "{} Config block (version {}) extracted to {}",
            style("Success:").green(),
            record.version,
            style(args.output.display()).cyan()
        ),
        ExtractionOrigin::Default(reason) => println_if!(
            args.silent,
            "{} Config block erased or altered ({}), default configuration written to {}",
            style("Warning:").yellow(),
            reason,
            style(args.output.display()).cyan()
        ),
    }

    Ok(())
}
