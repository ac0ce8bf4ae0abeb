//! Formant frequency tables and interpolation.
//!
//! Each table holds F1, F2, F3 (Hz) for the vowels A, E, I, O, U. The voice
//! morph crossfades male to female over [0, 0.5] and female to child over
//! [0.5, 1]; the vowel position interpolates linearly between adjacent rows.

use voxform_spec::params::{VOICE_MORPH_RANGE, VOWEL_RANGE};

/// Number of vowels per table.
pub const VOWEL_COUNT: usize = 5;

/// Number of formants per vowel.
pub const FORMANT_COUNT: usize = 3;

/// One voice type's formant frequencies, indexed `[vowel][formant]`.
pub type FormantSet = [[f32; FORMANT_COUNT]; VOWEL_COUNT];

/// Adult male formants.
pub const MALE_FORMANTS: FormantSet = [
    [800.0, 1150.0, 2900.0],
    [400.0, 2000.0, 2600.0],
    [350.0, 2200.0, 2900.0],
    [450.0, 800.0, 2830.0],
    [325.0, 700.0, 2700.0],
];

/// Adult female formants.
pub const FEMALE_FORMANTS: FormantSet = [
    [1000.0, 1700.0, 3200.0],
    [500.0, 2500.0, 3100.0],
    [400.0, 2900.0, 3350.0],
    [600.0, 900.0, 3200.0],
    [350.0, 800.0, 3000.0],
];

/// Child formants.
pub const CHILD_FORMANTS: FormantSet = [
    [1200.0, 2300.0, 3500.0],
    [700.0, 3000.0, 3400.0],
    [500.0, 3500.0, 3700.0],
    [700.0, 1200.0, 3300.0],
    [400.0, 1100.0, 3200.0],
];

/// Crossfade weights for the three voice tables. Always sums to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceWeights {
    /// Weight of the male table.
    pub male: f32,
    /// Weight of the female table.
    pub female: f32,
    /// Weight of the child table.
    pub child: f32,
}

impl VoiceWeights {
    /// Computes the weights for a voice morph position (clamped to [0, 1]).
    pub fn from_morph(morph: f32) -> Self {
        let m = VOICE_MORPH_RANGE.clamp(morph);
        if m <= 0.5 {
            Self {
                male: 1.0 - 2.0 * m,
                female: 2.0 * m,
                child: 0.0,
            }
        } else {
            Self {
                male: 0.0,
                female: 1.0 - 2.0 * (m - 0.5),
                child: 2.0 * (m - 0.5),
            }
        }
    }

    /// Blends one table entry across the three voice types.
    #[inline]
    pub fn blend(&self, vowel_index: usize, formant_index: usize) -> f32 {
        MALE_FORMANTS[vowel_index][formant_index] * self.male
            + FEMALE_FORMANTS[vowel_index][formant_index] * self.female
            + CHILD_FORMANTS[vowel_index][formant_index] * self.child
    }
}

/// Blends a single table entry for a voice morph position.
///
/// # Panics
/// Panics if `vowel_index >= 5` or `formant_index >= 3`.
pub fn blend(vowel_index: usize, formant_index: usize, voice_morph: f32) -> f32 {
    VoiceWeights::from_morph(voice_morph).blend(vowel_index, formant_index)
}

/// Converts a brightness offset in semitones to a frequency multiplier.
#[inline]
pub fn pitch_scale(brightness: f32) -> f32 {
    2.0_f32.powf(brightness / 12.0)
}

/// Interpolated F1, F2, F3 for a vowel position and voice morph, scaled
/// by `pitch_scale`.
///
/// The vowel position is clamped to [0, 4]; position 4 resolves to the end
/// of the O-U segment rather than extrapolating past U.
pub fn formants(vowel: f32, voice_morph: f32, pitch_scale: f32) -> [f32; FORMANT_COUNT] {
    let v = VOWEL_RANGE.clamp(vowel);
    let mut idx = v.floor() as usize;
    let mut frac = v - idx as f32;
    if idx >= VOWEL_COUNT - 1 {
        idx = VOWEL_COUNT - 2;
        frac = 1.0;
    }

    let weights = VoiceWeights::from_morph(voice_morph);
    let mut out = [0.0; FORMANT_COUNT];
    for (j, f) in out.iter_mut().enumerate() {
        let a = weights.blend(idx, j);
        let b = weights.blend(idx + 1, j);
        *f = (a + (b - a) * frac) * pitch_scale;
    }
    out
}
