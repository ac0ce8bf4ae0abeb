//! Formant filter parameters.
//!
//! [`FormantParams`] is the serializable form of every control the filter
//! exposes. The ranges defined here are the single source of truth for
//! clamping: the backend setters use the same [`ParamRange`] constants.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// Closed interval a parameter is clamped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    /// Lower bound (inclusive).
    pub min: f32,
    /// Upper bound (inclusive).
    pub max: f32,
}

impl ParamRange {
    /// Creates a new range.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamps a value into the range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Returns true if the value lies inside the range.
    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Vowel position: 0 = A, 1 = E, 2 = I, 3 = O, 4 = U.
pub const VOWEL_RANGE: ParamRange = ParamRange::new(0.0, 4.0);
/// Resonance of each formant band.
pub const Q_RANGE: ParamRange = ParamRange::new(0.1, 30.0);
/// Voice-type morph: 0 = male, 0.5 = female, 1 = child.
pub const VOICE_MORPH_RANGE: ParamRange = ParamRange::new(0.0, 1.0);
/// Formant shift in semitones.
pub const BRIGHTNESS_RANGE: ParamRange = ParamRange::new(-24.0, 24.0);
/// Dry/wet balance.
pub const MIX_RANGE: ParamRange = ParamRange::new(0.0, 1.0);
/// Vowel modulation depth in vowel units.
pub const VOWEL_MOD_DEPTH_RANGE: ParamRange = ParamRange::new(0.0, 4.0);
/// Brightness modulation depth in semitones.
pub const BRIGHTNESS_MOD_DEPTH_RANGE: ParamRange = ParamRange::new(0.0, 48.0);
/// Breath and consonant excitation levels.
pub const LEVEL_RANGE: ParamRange = ParamRange::new(0.0, 1.0);

/// Mix at or below which the filter passes input through untouched.
pub const MIX_EPSILON: f32 = 1e-5;

/// Noise excitation levels for the three consonant colours.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsonantLevels {
    /// Sibilance ("S"), highpassed noise (0.0-1.0).
    pub s: f32,
    /// Fricative ("F"), lowpassed noise (0.0-1.0).
    pub f: f32,
    /// Nasal colouring, heavily lowpassed noise and input (0.0-1.0).
    pub nasal: f32,
}

impl ConsonantLevels {
    /// Creates consonant levels.
    pub fn new(s: f32, f: f32, nasal: f32) -> Self {
        Self { s, f, nasal }
    }
}

/// Complete formant filter preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormantParams {
    /// Vowel position (0.0 = A ... 4.0 = U, fractional values morph).
    pub vowel: f32,
    /// Resonance (0.1-30.0).
    pub q: f32,
    /// Output gain multiplier applied to the wet signal.
    pub gain: f32,
    /// Voice-type morph (0.0 = male, 0.5 = female, 1.0 = child).
    pub voice_morph: f32,
    /// Formant shift in semitones (-24.0-24.0), positive is brighter.
    pub brightness: f32,
    /// Dry/wet mix (0.0 = dry, 1.0 = wet).
    pub mix: f32,
    /// Vowel modulation depth in vowel units (0.0-4.0).
    pub vowel_mod_depth: f32,
    /// Brightness modulation depth in semitones (0.0-48.0).
    pub brightness_mod_depth: f32,
    /// Breath noise level (0.0-1.0).
    pub breath: f32,
    /// Consonant noise levels.
    pub consonant: ConsonantLevels,
    /// Pass input through unprocessed.
    pub bypass: bool,
}

impl Default for FormantParams {
    fn default() -> Self {
        Self {
            vowel: 0.0,
            q: 5.0,
            gain: 1.0,
            voice_morph: 0.0,
            brightness: 0.0,
            mix: 1.0,
            vowel_mod_depth: 0.0,
            brightness_mod_depth: 0.0,
            breath: 0.0,
            consonant: ConsonantLevels::default(),
            bypass: false,
        }
    }
}

impl FormantParams {
    /// Parses a preset from JSON.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a preset file.
    pub fn from_file(path: &Path) -> Result<Self, SpecError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Serializes the preset to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns true when the filter copies input straight to output.
    pub fn is_bypassed(&self) -> bool {
        self.bypass || self.mix <= MIX_EPSILON
    }

    /// Returns a copy with every ranged field clamped into its domain.
    ///
    /// Non-finite values fall back to the default for that field.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let fit = |value: f32, fallback: f32, range: ParamRange| {
            if value.is_finite() {
                range.clamp(value)
            } else {
                fallback
            }
        };
        Self {
            vowel: fit(self.vowel, defaults.vowel, VOWEL_RANGE),
            q: fit(self.q, defaults.q, Q_RANGE),
            gain: if self.gain.is_finite() {
                self.gain
            } else {
                defaults.gain
            },
            voice_morph: fit(self.voice_morph, defaults.voice_morph, VOICE_MORPH_RANGE),
            brightness: fit(self.brightness, defaults.brightness, BRIGHTNESS_RANGE),
            mix: fit(self.mix, defaults.mix, MIX_RANGE),
            vowel_mod_depth: fit(
                self.vowel_mod_depth,
                defaults.vowel_mod_depth,
                VOWEL_MOD_DEPTH_RANGE,
            ),
            brightness_mod_depth: fit(
                self.brightness_mod_depth,
                defaults.brightness_mod_depth,
                BRIGHTNESS_MOD_DEPTH_RANGE,
            ),
            breath: fit(self.breath, defaults.breath, LEVEL_RANGE),
            consonant: ConsonantLevels {
                s: fit(self.consonant.s, 0.0, LEVEL_RANGE),
                f: fit(self.consonant.f, 0.0, LEVEL_RANGE),
                nasal: fit(self.consonant.nasal, 0.0, LEVEL_RANGE),
            },
            bypass: self.bypass,
        }
    }

    /// Ranged fields as `(name, value, range)` triples, in declaration order.
    pub(crate) fn ranged_fields(&self) -> [(&'static str, f32, ParamRange); 11] {
        [
            ("vowel", self.vowel, VOWEL_RANGE),
            ("q", self.q, Q_RANGE),
            ("voice_morph", self.voice_morph, VOICE_MORPH_RANGE),
            ("brightness", self.brightness, BRIGHTNESS_RANGE),
            ("mix", self.mix, MIX_RANGE),
            ("vowel_mod_depth", self.vowel_mod_depth, VOWEL_MOD_DEPTH_RANGE),
            (
                "brightness_mod_depth",
                self.brightness_mod_depth,
                BRIGHTNESS_MOD_DEPTH_RANGE,
            ),
            ("breath", self.breath, LEVEL_RANGE),
            ("consonant.s", self.consonant.s, LEVEL_RANGE),
            ("consonant.f", self.consonant.f, LEVEL_RANGE),
            ("consonant.nasal", self.consonant.nasal, LEVEL_RANGE),
        ]
    }
}
