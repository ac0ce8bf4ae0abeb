//! Biquad and one-pole filter building blocks.
//!
//! Band-pass coefficients follow the Audio EQ Cookbook constant skirt gain
//! form. Resonator state uses the transposed direct form II, which keeps
//! exactly two state values per section and tolerates per-block
//! coefficient changes without resetting.

use std::f32::consts::PI;

pub mod formant;

pub use formant::{FormantBank, ResonatorBand};

/// Fraction of the remaining distance active coefficients move per block.
pub const MORPH_ALPHA: f32 = 0.15;

/// Highest formant frequency as a fraction of the sample rate.
pub const MAX_FREQUENCY_RATIO: f32 = 0.45;

/// Lowest formant frequency in Hz.
pub const MIN_FREQUENCY: f32 = 20.0;

/// Normalized biquad coefficients (a0 divided out).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    pub a1: f32,
    pub a2: f32,
}

impl BiquadCoeffs {
    /// Creates bandpass filter coefficients (constant skirt gain).
    ///
    /// # Arguments
    /// * `center` - Center frequency in Hz
    /// * `q` - Q factor (bandwidth = center / Q)
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn bandpass(center: f32, q: f32, sample_rate: f32) -> Self {
        let omega = 2.0 * PI * center / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / (2.0 * q);

        let b0 = alpha;
        let b1 = 0.0;
        let b2 = -alpha;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }

    /// Moves every coefficient a fraction `alpha` of the way to `target`.
    #[inline]
    pub fn morph_toward(&mut self, target: &BiquadCoeffs, alpha: f32) {
        self.b0 += alpha * (target.b0 - self.b0);
        self.b1 += alpha * (target.b1 - self.b1);
        self.b2 += alpha * (target.b2 - self.b2);
        self.a1 += alpha * (target.a1 - self.a1);
        self.a2 += alpha * (target.a2 - self.a2);
    }

    /// Largest absolute difference to another coefficient set.
    pub fn max_distance(&self, other: &BiquadCoeffs) -> f32 {
        [
            self.b0 - other.b0,
            self.b1 - other.b1,
            self.b2 - other.b2,
            self.a1 - other.a1,
            self.a2 - other.a2,
        ]
        .iter()
        .fold(0.0_f32, |acc, d| acc.max(d.abs()))
    }

    /// Pole radius for complex-conjugate poles, `sqrt(a2)`.
    pub fn pole_radius(&self) -> f32 {
        self.a2.max(0.0).sqrt()
    }

    /// Returns true if all coefficients are finite.
    pub fn is_finite(&self) -> bool {
        self.b0.is_finite()
            && self.b1.is_finite()
            && self.b2.is_finite()
            && self.a1.is_finite()
            && self.a2.is_finite()
    }
}

/// Bounds a formant frequency to `[MIN_FREQUENCY, MAX_FREQUENCY_RATIO * sample_rate]`.
#[inline]
pub fn clamp_frequency(frequency: f32, sample_rate: f32) -> f32 {
    frequency
        .min(sample_rate * MAX_FREQUENCY_RATIO)
        .max(MIN_FREQUENCY)
}

/// One-pole lowpass with a fixed smoothing coefficient: `y += a * (x - y)`.
#[derive(Debug, Clone, Copy)]
pub struct OnePoleFilter {
    coeff: f32,
    y1: f32,
}

impl OnePoleFilter {
    /// Creates a one-pole lowpass with zeroed state.
    pub const fn new(coeff: f32) -> Self {
        Self { coeff, y1: 0.0 }
    }

    /// Processes a single sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.y1 += self.coeff * (input - self.y1);
        self.y1
    }
}
