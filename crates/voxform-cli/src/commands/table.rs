//! Table command implementation
//!
//! Prints the F1-F3 frequencies the filter targets for each vowel at a
//! given voice morph and brightness.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;
use voxform_backend::table::{formants, pitch_scale, FORMANT_COUNT};
use voxform_spec::params::{BRIGHTNESS_RANGE, VOICE_MORPH_RANGE};
use voxform_spec::Vowel;

/// Formant frequencies for one vowel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub vowel: Vowel,
    pub formants: [f32; FORMANT_COUNT],
}

/// Builds the table rows (inputs are clamped like the setters clamp them).
pub fn build_rows(voice_morph: f32, brightness: f32) -> Vec<TableRow> {
    let morph = VOICE_MORPH_RANGE.clamp(voice_morph);
    let scale = pitch_scale(BRIGHTNESS_RANGE.clamp(brightness));
    Vowel::ALL
        .iter()
        .map(|&vowel| TableRow {
            vowel,
            formants: formants(vowel.position(), morph, scale),
        })
        .collect()
}

/// Run the table command
///
/// # Arguments
/// * `voice_morph` - Voice-type morph (0 male, 0.5 female, 1 child)
/// * `brightness` - Brightness offset in semitones
/// * `json` - Print JSON instead of a table
pub fn run(voice_morph: f32, brightness: f32, json: bool) -> Result<ExitCode> {
    let rows = build_rows(voice_morph, brightness);

    if json {
        let out = serde_json::to_string_pretty(&rows).context("Failed to serialize table")?;
        println!("{}", out);
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{} morph {:.2}, brightness {:+.1} st",
        "Formants:".cyan().bold(),
        VOICE_MORPH_RANGE.clamp(voice_morph),
        BRIGHTNESS_RANGE.clamp(brightness)
    );
    println!(
        "  {:<6} {:>8} {:>8} {:>8}",
        "vowel".dimmed(),
        "F1".dimmed(),
        "F2".dimmed(),
        "F3".dimmed()
    );
    for row in &rows {
        let [f1, f2, f3] = row.formants;
        println!(
            "  {:<6} {:>8.1} {:>8.1} {:>8.1}",
            row.vowel.to_string().bold(),
            f1,
            f2,
            f3
        );
    }

    Ok(ExitCode::SUCCESS)
}
