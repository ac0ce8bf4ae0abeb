//! Voxform CLI - Command-line interface for the formant filter
//!
//! This binary renders WAV files through the filter and inspects its
//! formant tables and presets.

use clap::Parser;
use std::process::ExitCode;

use voxform_cli::commands;
use voxform_cli::commands::render::RenderPaths;
use voxform_cli::logging;

mod cli_args;

use cli_args::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            input,
            output,
            preset,
            vowel_mod,
            brightness_mod,
            params,
        } => commands::render::run(
            RenderPaths {
                input: &input,
                output: &output,
                preset: preset.as_deref(),
                vowel_mod: vowel_mod.as_deref(),
                brightness_mod: brightness_mod.as_deref(),
            },
            &params.overrides(),
        ),
        Commands::Table {
            voice,
            morph,
            brightness,
            json,
        } => {
            let morph = voice.map(|v| v.morph()).or(morph).unwrap_or(0.0);
            commands::table::run(morph, brightness, json)
        }
        Commands::Preset {
            validate,
            clamped,
            output,
        } => match validate {
            Some(path) => commands::preset::validate(&path, clamped),
            None => commands::preset::print_default(output.as_deref()),
        },
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
