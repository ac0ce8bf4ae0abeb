//! Per-block parameter smoothing and modulation.
//!
//! Targets arrive from [`FormantControls`](crate::FormantControls) and may
//! jump arbitrarily between blocks. The controller glides the base vowel
//! and Q toward them with one-pole smoothing, then folds in the block's
//! modulation to produce the processed vowel and brightness the rest of
//! the pipeline reads.

use voxform_spec::params::{BRIGHTNESS_RANGE, VOWEL_RANGE};
use voxform_spec::FormantParams;

use crate::table;

/// Base vowel smoothing coefficient per block.
pub const VOWEL_SMOOTHING: f32 = 0.25;

/// Q smoothing coefficient per block.
pub const Q_SMOOTHING: f32 = 0.30;

/// Processed brightness smoothing coefficient per block.
pub const BRIGHTNESS_SMOOTHING: f32 = 0.6;

/// Q at which loudness compensation is unity.
pub const REFERENCE_Q: f32 = 5.0;

/// Smoothed and derived parameter state, owned by the audio context.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterController {
    vowel: f32,
    q: f32,
    comp_gain: f32,
    proc_vowel: f32,
    proc_brightness: f32,
    pitch_scale: f32,
}

impl ParameterController {
    /// Creates a controller at the construction defaults (vowel A, Q 5,
    /// no brightness offset).
    pub fn new() -> Self {
        let defaults = FormantParams::default();
        Self {
            vowel: defaults.vowel,
            q: defaults.q,
            comp_gain: compensation_gain(defaults.q),
            proc_vowel: defaults.vowel,
            proc_brightness: defaults.brightness,
            pitch_scale: 1.0,
        }
    }

    /// Glides the base vowel and Q one block toward their targets and
    /// recomputes the loudness compensation.
    pub fn smooth(&mut self, targets: &FormantParams) {
        self.vowel += VOWEL_SMOOTHING * (targets.vowel - self.vowel);
        self.q += Q_SMOOTHING * (targets.q - self.q);
        self.comp_gain = compensation_gain(self.q);
    }

    /// Applies block-mean modulation (each in [-1, 1]) and derives the
    /// processed vowel, processed brightness, and pitch scale.
    pub fn modulate(&mut self, targets: &FormantParams, mod_vowel: f32, mod_brightness: f32) {
        self.proc_vowel = VOWEL_RANGE.clamp(self.vowel + mod_vowel * targets.vowel_mod_depth);

        let brightness = BRIGHTNESS_RANGE
            .clamp(targets.brightness + mod_brightness * targets.brightness_mod_depth);
        self.proc_brightness += BRIGHTNESS_SMOOTHING * (brightness - self.proc_brightness);
        self.pitch_scale = table::pitch_scale(self.proc_brightness);
    }

    /// Smoothed base vowel.
    pub fn vowel(&self) -> f32 {
        self.vowel
    }

    /// Smoothed Q.
    pub fn q(&self) -> f32 {
        self.q
    }

    /// `sqrt(Q / REFERENCE_Q)` for the smoothed Q.
    pub fn comp_gain(&self) -> f32 {
        self.comp_gain
    }

    /// Modulated vowel position in [0, 4].
    pub fn proc_vowel(&self) -> f32 {
        self.proc_vowel
    }

    /// Modulated, smoothed brightness in semitones.
    pub fn proc_brightness(&self) -> f32 {
        self.proc_brightness
    }

    /// Formant frequency multiplier for the processed brightness.
    pub fn pitch_scale(&self) -> f32 {
        self.pitch_scale
    }
}

impl Default for ParameterController {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn compensation_gain(q: f32) -> f32 {
    (q / REFERENCE_Q).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(vowel: f32, q: f32) -> FormantParams {
        FormantParams {
            vowel,
            q,
            ..FormantParams::default()
        }
    }

    #[test]
    fn test_defaults() {
        let c = ParameterController::new();
        assert_eq!(c.vowel(), 0.0);
        assert_eq!(c.q(), 5.0);
        assert_eq!(c.comp_gain(), 1.0);
        assert_eq!(c.pitch_scale(), 1.0);
    }

    #[test]
    fn test_smoothing_steps() {
        let mut c = ParameterController::new();
        c.smooth(&targets(4.0, 15.0));
        assert!((c.vowel() - 1.0).abs() < 1e-6);
        assert!((c.q() - 8.0).abs() < 1e-6);
        assert!((c.comp_gain() - (8.0_f32 / 5.0).sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_vowel_sweep_never_overshoots() {
        let mut c = ParameterController::new();
        let mut prev = c.vowel();
        for block in 0..300 {
            let target = (block as f32 / 50.0).min(4.0);
            c.smooth(&targets(target, 5.0));
            assert!(c.vowel() >= prev, "block {block}: {} < {prev}", c.vowel());
            assert!(c.vowel() <= target + 1e-6);
            prev = c.vowel();
        }
        assert!((c.vowel() - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_vowel_modulation_clamps() {
        let mut c = ParameterController::new();
        let params = FormantParams {
            vowel_mod_depth: 4.0,
            ..FormantParams::default()
        };
        c.modulate(&params, 1.0, 0.0);
        assert_eq!(c.proc_vowel(), 4.0);
        c.modulate(&params, -1.0, 0.0);
        assert_eq!(c.proc_vowel(), 0.0);
    }

    #[test]
    fn test_brightness_smoothing_and_pitch_scale() {
        let mut c = ParameterController::new();
        let params = FormantParams {
            brightness: 12.0,
            ..FormantParams::default()
        };
        c.modulate(&params, 0.0, 0.0);
        assert!((c.proc_brightness() - 7.2).abs() < 1e-5);
        for _ in 0..50 {
            c.modulate(&params, 0.0, 0.0);
        }
        assert!((c.proc_brightness() - 12.0).abs() < 1e-4);
        assert!((c.pitch_scale() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_brightness_modulation_clamps_before_smoothing() {
        let mut c = ParameterController::new();
        let params = FormantParams {
            brightness: 20.0,
            brightness_mod_depth: 48.0,
            ..FormantParams::default()
        };
        for _ in 0..100 {
            c.modulate(&params, 1.0, 1.0);
        }
        assert!(c.proc_brightness() <= 24.0);
        assert!((c.proc_brightness() - 24.0).abs() < 1e-4);
    }
}
