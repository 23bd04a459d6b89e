//! Generate command - compiles a text configuration into a binary block

use anyhow::{Context, Result};
use console::style;
use std::path::PathBuf;

use cfconfig_core::{binary::bytes_to_hex, ConfigBlockService, ServiceConfig};

/// Arguments for the generate command
pub struct GenerateArgs {
    /// Text configuration to read
    pub input: PathBuf,
    /// Binary block to write
    pub output: PathBuf,
    /// Service policy, settings file with flag overrides applied
    pub config: ServiceConfig,
    /// Suppress output
    pub silent: bool,
}

/// Execute the generate command
pub fn execute(args: GenerateArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let service = ConfigBlockService::with_config(args.config);
    let block = service
        .generate(&text)
        .with_context(|| format!("Failed to compile {}", args.input.display()))?;

    tracing::debug!("Config block bytes: {}", bytes_to_hex(&block));

    // Block is complete in memory before the output is touched
    std::fs::write(&args.output, block)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println_if!(
        args.silent,
        "{} Config block compiled to {} (checksum 0x{:02x})",
        style("Success:").green(),
        style(args.output.display()).cyan(),
        block[block.len() - 1]
    );

    Ok(())
}
