//! Settings file management command

use anyhow::{Context, Result};
use cfconfig_core::Settings;
use console::style;
use std::path::PathBuf;

/// Arguments for the config command
pub struct ConfigArgs {
    /// Initialize a new settings file with defaults
    pub init: bool,
    /// Show the path to the settings file
    pub path: bool,
    /// Show settings in JSON format
    pub json: bool,
    /// Suppress output (for scripting)
    pub silent: bool,
    /// Settings file path (default location when not overridden)
    pub config_file: Option<PathBuf>,
}

/// Execute the config command
pub fn execute(args: ConfigArgs) -> Result<()> {
    if args.path {
        if let Some(path) = &args.config_file {
            if !args.silent {
                println!("{}", path.display());
            }
        } else if !args.silent {
            eprintln!("{}", style("Could not determine config path").yellow());
        }
        return Ok(());
    }

    if args.init {
        return init_config(args.config_file, args.silent);
    }

    show_config(args.config_file, args.json, args.silent)
}

/// Initialize a new settings file with default values
fn init_config(config_path: Option<PathBuf>, silent: bool) -> Result<()> {
    let path = config_path.context("Could not determine configuration directory")?;

    if path.exists() {
        if !silent {
            eprintln!(
                "{} Settings file already exists at: {}",
                style("Warning:").yellow(),
                path.display()
            );
            eprintln!("Use a text editor to modify it, or delete it to re-initialize.");
        }
        return Ok(());
    }

    Settings::default()
        .save(&path)
        .context("Failed to save settings file")?;

    if !silent {
        println!(
            "{} Created settings file at: {}",
            style("Success:").green(),
            path.display()
        );
        println!();
        println!("  [generate]");
        println!("  strict = true                # Reject out-of-range channels");
        println!();
        println!("  [extract]");
        println!("  fallback_to_default = false  # Fail on erased blocks");
    }

    Ok(())
}

/// Show the current settings
fn show_config(config_path: Option<PathBuf>, json: bool, silent: bool) -> Result<()> {
    if silent {
        return Ok(());
    }

    let config_exists = config_path.as_ref().is_some_and(|p| p.exists());
    let settings = Settings::load(config_path.as_deref());

    if json {
        let json_output = serde_json::to_string_pretty(&settings)
            .context("Failed to serialize settings to JSON")?;
        println!("{}", json_output);
        return Ok(());
    }

    println!("{}", style("cfconfig Settings").bold());
    println!();

    if let Some(path) = &config_path {
        if config_exists {
            println!("  {} {}", style("Settings file:").dim(), path.display());
        } else {
            println!(
                "  {} {} {}",
                style("Settings file:").dim(),
                path.display(),
                style("(not found, using defaults)").yellow()
            );
        }
    }
    println!();

    println!("{}", style("[generate]").cyan());
    println!("  strict = {}", settings.generate.strict);
    println!();

    println!("{}", style("[extract]").cyan());
    println!(
        "  fallback_to_default = {}",
        settings.extract.fallback_to_default
    );
    println!();

    println!("{}", style("[behavior]").cyan());
    println!("  quiet = {}", settings.behavior.quiet);

    if !config_exists {
        println!();
        println!(
            "{}",
            style("Run 'cfconfig config --init' to create a settings file.").dim()
        );
    }

    Ok(())
}
