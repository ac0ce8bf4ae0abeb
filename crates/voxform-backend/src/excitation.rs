//! Breath and consonant noise excitation.
//!
//! One noise sample is drawn per audio sample and shaped into four
//! additive contributions that are mixed into the dry sample before it
//! reaches the resonator bank:
//!
//! - breath: raw noise
//! - sibilance ("S"): noise minus its one-pole lowpass
//! - fricative ("F"): one-pole lowpass of noise
//! - nasal: slow one-pole lowpass of noise blended with the running sample

use crate::filter::OnePoleFilter;
use crate::rng::NoiseGenerator;

const BREATH_SCALE: f32 = 0.25;
const SIBILANCE_SCALE: f32 = 0.20;
const FRICATIVE_SCALE: f32 = 0.15;
const NASAL_SCALE: f32 = 0.20;

const SIBILANCE_COEFF: f32 = 0.2;
const FRICATIVE_COEFF: f32 = 0.05;
const NASAL_COEFF: f32 = 0.02;

/// Excitation levels, each in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExcitationLevels {
    /// Breath noise.
    pub breath: f32,
    /// Sibilance.
    pub sibilance: f32,
    /// Fricative.
    pub fricative: f32,
    /// Nasal colouring.
    pub nasal: f32,
}

impl ExcitationLevels {
    /// Returns true when every level is zero.
    pub fn is_silent(&self) -> bool {
        self.breath == 0.0 && self.sibilance == 0.0 && self.fricative == 0.0 && self.nasal == 0.0
    }
}

/// Noise excitation synthesizer.
///
/// A contribution whose level is exactly zero is skipped and its filter
/// state is held; the noise generator advances every sample regardless, so
/// the noise sequence never depends on the levels.
#[derive(Debug, Clone)]
pub struct ExcitationSynth {
    noise: NoiseGenerator,
    sibilance: OnePoleFilter,
    fricative: OnePoleFilter,
    nasal: OnePoleFilter,
}

impl ExcitationSynth {
    /// Creates a synthesizer with the default noise seed and zeroed filters.
    pub fn new() -> Self {
        Self::with_noise(NoiseGenerator::default())
    }

    /// Creates a synthesizer around an existing noise generator.
    pub fn with_noise(noise: NoiseGenerator) -> Self {
        Self {
            noise,
            sibilance: OnePoleFilter::new(SIBILANCE_COEFF),
            fricative: OnePoleFilter::new(FRICATIVE_COEFF),
            nasal: OnePoleFilter::new(NASAL_COEFF),
        }
    }

    /// Adds excitation to one dry sample and returns the excited sample.
    #[inline]
    pub fn excite(&mut self, x: f32, levels: &ExcitationLevels) -> f32 {
        let n = self.noise.next_noise();
        if levels.is_silent() {
            return x;
        }
        let mut x = x;

        if levels.breath != 0.0 {
            x += n * levels.breath * BREATH_SCALE;
        }

        if levels.sibilance != 0.0 {
            let high = n - self.sibilance.process(n);
            x += high * levels.sibilance * SIBILANCE_SCALE;
        }

        if levels.fricative != 0.0 {
            x += self.fricative.process(n) * levels.fricative * FRICATIVE_SCALE;
        }

        if levels.nasal != 0.0 {
            x += self.nasal.process(0.5 * n + 0.5 * x) * levels.nasal * NASAL_SCALE;
        }

        x
    }

    /// The underlying noise generator.
    pub fn noise(&self) -> &NoiseGenerator {
        &self.noise
    }
}

impl Default for ExcitationSynth {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_levels_pass_input() {
        let mut synth = ExcitationSynth::new();
        let levels = ExcitationLevels::default();
        assert!(levels.is_silent());
        for i in 0..256 {
            let x = (i as f32 * 0.01).sin() * 0.5;
            assert_eq!(synth.excite(x, &levels), x);
        }
    }

    #[test]
    fn test_noise_advances_when_silent() {
        let mut synth = ExcitationSynth::new();
        let mut reference = NoiseGenerator::default();
        for _ in 0..10 {
            synth.excite(0.0, &ExcitationLevels::default());
            reference.next_noise();
        }
        assert_eq!(synth.noise(), &reference);
    }

    #[test]
    fn test_breath_is_scaled_noise() {
        let mut synth = ExcitationSynth::new();
        let mut reference = NoiseGenerator::default();
        let levels = ExcitationLevels {
            breath: 0.8,
            ..ExcitationLevels::default()
        };
        for _ in 0..100 {
            let expected = reference.next_noise() * 0.8 * BREATH_SCALE;
            assert_eq!(synth.excite(0.0, &levels), expected);
        }
    }

    /// Reference one-pole lowpass step.
    fn lowpass(state: &mut f32, coeff: f32, input: f32) -> f32 {
        *state += coeff * (input - *state);
        *state
    }

    fn assert_close(actual: f32, expected: f32, index: usize) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "sample {index}: {actual} vs {expected}"
        );
    }

    #[test]
    fn test_sibilance_is_scaled_highpass_noise() {
        let mut synth = ExcitationSynth::new();
        let mut reference = NoiseGenerator::default();
        let mut lp = 0.0;
        let levels = ExcitationLevels {
            sibilance: 0.6,
            ..ExcitationLevels::default()
        };
        for i in 0..500 {
            let n = reference.next_noise();
            let expected = (n - lowpass(&mut lp, 0.2, n)) * 0.6 * 0.20;
            assert_close(synth.excite(0.0, &levels), expected, i);
        }
    }

    #[test]
    fn test_fricative_is_scaled_lowpass_noise() {
        let mut synth = ExcitationSynth::new();
        let mut reference = NoiseGenerator::default();
        let mut lp = 0.0;
        let levels = ExcitationLevels {
            fricative: 0.9,
            ..ExcitationLevels::default()
        };
        for i in 0..500 {
            let n = reference.next_noise();
            let expected = lowpass(&mut lp, 0.05, n) * 0.9 * 0.15;
            assert_close(synth.excite(0.0, &levels), expected, i);
        }
    }

    #[test]
    fn test_nasal_blends_noise_with_input() {
        let mut synth = ExcitationSynth::new();
        let mut reference = NoiseGenerator::default();
        let mut lp = 0.0;
        let levels = ExcitationLevels {
            nasal: 0.7,
            ..ExcitationLevels::default()
        };
        for i in 0..500 {
            let x = (i as f32 * 0.03).sin() * 0.4;
            let n = reference.next_noise();
            let expected = x + lowpass(&mut lp, 0.02, 0.5 * n + 0.5 * x) * 0.7 * 0.20;
            assert_close(synth.excite(x, &levels), expected, i);
        }
    }

    #[test]
    fn test_nasal_follows_the_excited_sample() {
        let levels = ExcitationLevels {
            breath: 0.5,
            sibilance: 0.4,
            fricative: 0.8,
            nasal: 1.0,
        };
        let mut synth = ExcitationSynth::new();
        let mut reference = NoiseGenerator::default();
        let (mut sib, mut fric, mut nasal, mut nasal_dry) = (0.0, 0.0, 0.0, 0.0);
        let mut max_gap: f32 = 0.0;

        for i in 0..2000 {
            let input = (i as f32 * 0.02).sin() * 0.3;
            let n = reference.next_noise();

            let mut x = input;
            x += n * 0.5 * 0.25;
            x += (n - lowpass(&mut sib, 0.2, n)) * 0.4 * 0.20;
            x += lowpass(&mut fric, 0.05, n) * 0.8 * 0.15;
            let expected = x + lowpass(&mut nasal, 0.02, 0.5 * n + 0.5 * x) * 0.20;
            let from_dry = x + lowpass(&mut nasal_dry, 0.02, 0.5 * n + 0.5 * input) * 0.20;

            assert_close(synth.excite(input, &levels), expected, i);
            max_gap = max_gap.max((expected - from_dry).abs());
        }

        // Feeding the un-excited input to the nasal filter is audibly different.
        assert!(max_gap > 1e-4, "gap {max_gap}");
    }

    #[test]
    fn test_fricative_is_smoother_than_sibilance() {
        let roughness = |levels: ExcitationLevels| {
            let mut synth = ExcitationSynth::new();
            let mut prev = 0.0;
            let mut total = 0.0;
            for _ in 0..20_000 {
                let y = synth.excite(0.0, &levels);
                total += (y - prev).abs();
                prev = y;
            }
            total
        };
        let sibilance = roughness(ExcitationLevels {
            sibilance: 1.0,
            ..ExcitationLevels::default()
        });
        let fricative = roughness(ExcitationLevels {
            fricative: 1.0,
            ..ExcitationLevels::default()
        });
        assert!(sibilance > fricative * 2.0);
    }

    #[test]
    fn test_excitation_is_deterministic() {
        let levels = ExcitationLevels {
            breath: 0.3,
            sibilance: 0.5,
            fricative: 0.2,
            nasal: 0.7,
        };
        let run = || {
            let mut synth = ExcitationSynth::new();
            (0..500)
                .map(|i| synth.excite((i as f32 * 0.05).sin() * 0.3, &levels))
                .collect::<Vec<f32>>()
        };
        assert_eq!(run(), run());
    }
}
