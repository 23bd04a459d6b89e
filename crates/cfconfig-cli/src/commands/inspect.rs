//! Inspect command - shows the contents and validity of a binary block

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use cfconfig_core::{BinaryCodec, BlockReport};

/// Execute the inspect command
pub fn execute(input: &Path, json: bool, silent: bool) -> Result<()> {
    let data =
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;

    let report = BinaryCodec::new().inspect(&data);

    if silent {
        return Ok(());
    }

    if json {
        let json_output = serde_json::to_string_pretty(&report)
            .context("Failed to serialize block report to JSON")?;
        println!("{}", json_output);
    } else {
        print_report(input, &report);
    }

    Ok(())
}

fn print_report(input: &Path, report: &BlockReport) {
    println!("{} {}", style("Config block:").bold(), style(input.display()).cyan());
    println!();
    println!("  {} {} bytes", style("Length:").dim(), report.length);
    println!(
        "  {} {} {}",
        style("Magic:").dim(),
        report.magic.as_deref().unwrap_or("-"),
        ok_mark(report.magic_ok)
    );
    match (report.stored_checksum, report.checksum_sum) {
        (Some(stored), Some(sum)) => println!(
            "  {} 0x{:02x} (sum 0x{:02x}) {}",
            style("Checksum:").dim(),
            stored,
            sum,
            ok_mark(sum == 0)
        ),
        _ => println!("  {} -", style("Checksum:").dim()),
    }
    match report.version {
        Some(version) => println!(
            "  {} {} (expected {})",
            style("Version:").dim(),
            version,
            report.expected_version
        ),
        None => println!("  {} -", style("Version:").dim()),
    }
    println!();

    match (&report.record, &report.error) {
        (Some(record), _) => {
            println!("{}", style("[radio]").cyan());
            println!("  channel = {}", record.radio_channel);
            println!("  speed = {}", record.radio_speed);
            println!();
            println!("{}", style("[calib]").cyan());
            println!("  pitchTrim = {}", record.pitch_trim);
            println!("  rollTrim = {}", record.roll_trim);
        }
        (None, Some(error)) => {
            println!("{} {}", style("Invalid:").red().bold(), error);
        }
        (None, None) => {}
    }
}

fn ok_mark(ok: bool) -> console::StyledObject<&'static str> {
    if ok {
        style("ok").green()
    } else {
        style("mismatch").red()
    }
}
