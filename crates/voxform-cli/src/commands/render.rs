//! Render command implementation
//!
//! Runs a WAV file through the formant filter, block by block, exactly as
//! the real-time host would.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{info, warn};
use voxform_backend::wav::{read_wav_file, WavResult};
use voxform_backend::{render, FormantProcessor, RenderInput};
use voxform_spec::FormantParams;

use super::{print_errors, print_warnings};

/// Command-line parameter overrides, applied on top of the preset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParamOverrides {
    pub vowel: Option<f32>,
    pub q: Option<f32>,
    pub gain: Option<f32>,
    pub voice_morph: Option<f32>,
    pub brightness: Option<f32>,
    pub mix: Option<f32>,
    pub vowel_mod_depth: Option<f32>,
    pub brightness_mod_depth: Option<f32>,
    pub breath: Option<f32>,
    pub sibilance: Option<f32>,
    pub fricative: Option<f32>,
    pub nasal: Option<f32>,
    pub bypass: bool,
}

impl ParamOverrides {
    /// Writes every set override into `params`.
    pub fn apply_to(&self, params: &mut FormantParams) {
        let fields = [
            (self.vowel, &mut params.vowel),
            (self.q, &mut params.q),
            (self.gain, &mut params.gain),
            (self.voice_morph, &mut params.voice_morph),
            (self.brightness, &mut params.brightness),
            (self.mix, &mut params.mix),
            (self.vowel_mod_depth, &mut params.vowel_mod_depth),
            (self.brightness_mod_depth, &mut params.brightness_mod_depth),
            (self.breath, &mut params.breath),
            (self.sibilance, &mut params.consonant.s),
            (self.fricative, &mut params.consonant.f),
            (self.nasal, &mut params.consonant.nasal),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        params.bypass |= self.bypass;
    }
}

/// File arguments for a render.
#[derive(Debug, Clone, Copy)]
pub struct RenderPaths<'a> {
    pub input: &'a str,
    pub output: &'a str,
    pub preset: Option<&'a str>,
    pub vowel_mod: Option<&'a str>,
    pub brightness_mod: Option<&'a str>,
}

/// Loads the preset (or defaults) and applies overrides.
pub fn resolve_params(preset: Option<&str>, overrides: &ParamOverrides) -> Result<FormantParams> {
    let mut params = match preset {
        Some(path) => FormantParams::from_file(Path::new(path))
            .with_context(|| format!("Failed to load preset: {}", path))?,
        None => FormantParams::default(),
    };
    overrides.apply_to(&mut params);
    Ok(params)
}

/// Run the render command
///
/// # Returns
/// Exit code: 0 success, 1 invalid parameters
pub fn run(paths: RenderPaths<'_>, overrides: &ParamOverrides) -> Result<ExitCode> {
    let start = Instant::now();
    println!("{} {}", "Rendering:".cyan().bold(), paths.input);

    let params = resolve_params(paths.preset, overrides)?;
    let validation = params.validate();
    print_warnings(&validation.warnings);
    for warning in &validation.warnings {
        warn!(%warning, "preset value adjusted");
    }
    if !validation.is_ok() {
        print_errors(&validation.errors);
        println!("{} invalid parameters", "FAILED".red().bold());
        return Ok(ExitCode::from(1));
    }

    let audio = read_wav_file(Path::new(paths.input))
        .with_context(|| format!("Failed to read input WAV: {}", paths.input))?;
    let vowel_mod = read_optional(paths.vowel_mod, "vowel modulation")?;
    let brightness_mod = read_optional(paths.brightness_mod, "brightness modulation")?;
    if audio.is_empty() {
        bail!("input has no samples: {}", paths.input);
    }

    let mut input = RenderInput::new(&audio);
    if let Some(signal) = vowel_mod.as_deref() {
        input = input.with_vowel_mod(signal);
    }
    if let Some(signal) = brightness_mod.as_deref() {
        input = input.with_brightness_mod(signal);
    }

    let mut processor = FormantProcessor::new();
    processor.apply(&params);
    let result = render(&mut processor, input).context("Render failed")?;
    info!(stats = ?processor.stats(), "processor finished");

    let wav = WavResult::from_samples(&result.samples);
    wav.write_to(Path::new(paths.output))
        .with_context(|| format!("Failed to write output WAV: {}", paths.output))?;

    println!(
        "{} {} ({:.2}s, {} blocks, {} dropped, pcm {})",
        "SUCCESS".green().bold(),
        paths.output,
        wav.duration_seconds(),
        result.blocks,
        result.dropped_blocks,
        &result.pcm_hash[..16]
    );
    println!(
        "{} {}ms",
        "Time:".dimmed(),
        start.elapsed().as_millis()
    );

    Ok(ExitCode::SUCCESS)
}

fn read_optional(path: Option<&str>, what: &str) -> Result<Option<Vec<i16>>> {
    path.map(|p| {
        read_wav_file(Path::new(p)).with_context(|| format!("Failed to read {} WAV: {}", what, p))
    })
    .transpose()
}
