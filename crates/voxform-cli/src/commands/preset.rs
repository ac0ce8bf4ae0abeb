//! Preset command implementation
//!
//! Prints the default preset, or validates a preset file and reports what
//! the filter would clamp.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use voxform_spec::FormantParams;

use super::{print_errors, print_warnings};

/// Print the default preset as JSON, to stdout or a file.
pub fn print_default(output: Option<&str>) -> Result<ExitCode> {
    let json = FormantParams::default()
        .to_json_pretty()
        .context("Failed to serialize preset")?;

    match output {
        Some(path) => {
            fs::write(path, &json).with_context(|| format!("Failed to write to: {}", path))?;
            println!("{} Wrote default preset to: {}", "SUCCESS".green().bold(), path);
        }
        None => println!("{}", json),
    }

    Ok(ExitCode::SUCCESS)
}

/// Validate a preset file
///
/// # Arguments
/// * `path` - Path to the preset JSON file
/// * `show_clamped` - Also print the effective (clamped) preset
///
/// # Returns
/// Exit code: 0 if valid (warnings allowed), 1 if invalid
pub fn validate(path: &str, show_clamped: bool) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), path);

    let params = FormantParams::from_file(Path::new(path))
        .with_context(|| format!("Failed to load preset: {}", path))?;
    let result = params.validate();

    print_warnings(&result.warnings);
    if !result.is_ok() {
        print_errors(&result.errors);
        println!(
            "{} {} error(s), {} warning(s)",
            "FAILED".red().bold(),
            result.errors.len(),
            result.warnings.len()
        );
        return Ok(ExitCode::from(1));
    }

    println!(
        "{} valid ({} warning(s))",
        "SUCCESS".green().bold(),
        result.warnings.len()
    );
    if show_clamped {
        let effective = params
            .clamped()
            .to_json_pretty()
            .context("Failed to serialize preset")?;
        println!("{}", effective);
    }

    Ok(ExitCode::SUCCESS)
}
