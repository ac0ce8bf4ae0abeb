//! CLI argument definitions for the voxform command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Args, Parser, Subcommand};
use voxform_cli::commands::render::ParamOverrides;
use voxform_spec::{VoiceType, Vowel};

/// Voxform - Real-time formant filter, rendered offline
#[derive(Parser)]
#[command(name = "voxform")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run a 44.1 kHz WAV file through the formant filter
    Render {
        /// Input WAV file (multi-channel input is mixed to mono)
        #[arg(short, long)]
        input: String,

        /// Output WAV file (mono 16-bit)
        #[arg(short, long)]
        output: String,

        /// Preset JSON file (command-line values override it)
        #[arg(short, long)]
        preset: Option<String>,

        /// WAV file driving vowel modulation (block mean)
        #[arg(long)]
        vowel_mod: Option<String>,

        /// WAV file driving brightness modulation (block mean)
        #[arg(long)]
        brightness_mod: Option<String>,

        #[command(flatten)]
        params: ParamArgs,
    },

    /// Print formant frequencies for every vowel
    Table {
        /// Voice type (male, female, child)
        #[arg(long, conflicts_with = "morph")]
        voice: Option<VoiceType>,

        /// Voice-type morph (0 male, 0.5 female, 1 child)
        #[arg(long)]
        morph: Option<f32>,

        /// Brightness offset in semitones
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        brightness: f32,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the default preset or validate a preset file
    Preset {
        /// Preset file to validate
        #[arg(long)]
        validate: Option<String>,

        /// With --validate, also print the effective (clamped) preset
        #[arg(long, requires = "validate")]
        clamped: bool,

        /// Write the default preset here instead of stdout
        #[arg(short, long, conflicts_with = "validate")]
        output: Option<String>,
    },
}

/// Filter parameters settable from the command line.
#[derive(Args, Debug, Default)]
pub(crate) struct ParamArgs {
    /// Vowel: a, e, i, o, u, or a position from 0 to 4
    #[arg(long, value_parser = parse_vowel)]
    pub vowel: Option<f32>,

    /// Resonance (0.1-30)
    #[arg(long)]
    pub q: Option<f32>,

    /// Wet gain multiplier
    #[arg(long, allow_negative_numbers = true)]
    pub gain: Option<f32>,

    /// Voice type (male, female, child)
    #[arg(long, conflicts_with = "morph")]
    pub voice: Option<VoiceType>,

    /// Voice-type morph (0 male, 0.5 female, 1 child)
    #[arg(long)]
    pub morph: Option<f32>,

    /// Brightness offset in semitones (-24 to 24)
    #[arg(long, allow_negative_numbers = true)]
    pub brightness: Option<f32>,

    /// Dry/wet mix (0-1)
    #[arg(long)]
    pub mix: Option<f32>,

    /// Vowel modulation depth in vowel units (0-4)
    #[arg(long)]
    pub vowel_mod_depth: Option<f32>,

    /// Brightness modulation depth in semitones (0-48)
    #[arg(long)]
    pub brightness_mod_depth: Option<f32>,

    /// Breath noise level (0-1)
    #[arg(long)]
    pub breath: Option<f32>,

    /// Sibilance level (0-1)
    #[arg(long)]
    pub sibilance: Option<f32>,

    /// Fricative level (0-1)
    #[arg(long)]
    pub fricative: Option<f32>,

    /// Nasal level (0-1)
    #[arg(long)]
    pub nasal: Option<f32>,

    /// Pass input through unprocessed
    #[arg(long)]
    pub bypass: bool,
}

impl ParamArgs {
    pub fn overrides(&self) -> ParamOverrides {
        ParamOverrides {
            vowel: self.vowel,
            q: self.q,
            gain: self.gain,
            voice_morph: self.voice.map(VoiceType::morph).or(self.morph),
            brightness: self.brightness,
            mix: self.mix,
            vowel_mod_depth: self.vowel_mod_depth,
            brightness_mod_depth: self.brightness_mod_depth,
            breath: self.breath,
            sibilance: self.sibilance,
            fricative: self.fricative,
            nasal: self.nasal,
            bypass: self.bypass,
        }
    }
}

/// Accepts a vowel name or a numeric position.
pub(crate) fn parse_vowel(s: &str) -> Result<f32, String> {
    if let Ok(vowel) = s.parse::<Vowel>() {
        return Ok(vowel.position());
    }
    s.parse::<f32>()
        .map_err(|_| format!("'{}' is neither a vowel (a, e, i, o, u) nor a number", s))
}
