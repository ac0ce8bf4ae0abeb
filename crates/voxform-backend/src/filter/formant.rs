//! Parallel formant resonator bank.
//!
//! Three band-pass sections process the same input sample and their outputs
//! are summed. Each section keeps an active coefficient set, used for
//! processing, and a target set recomputed once per block; the active set
//! glides toward the target so vowel and resonance changes never step.

use super::{clamp_frequency, BiquadCoeffs, MORPH_ALPHA};
use crate::table::FORMANT_COUNT;

/// One resonator: coefficients being played, coefficients being approached,
/// and two samples of filter memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResonatorBand {
    active: BiquadCoeffs,
    target: BiquadCoeffs,
    z1: f32,
    z2: f32,
}

impl ResonatorBand {
    /// Recomputes the target coefficients. Active coefficients and state
    /// are untouched.
    pub fn set_target(&mut self, frequency: f32, q: f32, sample_rate: f32) {
        let frequency = clamp_frequency(frequency, sample_rate);
        self.target = BiquadCoeffs::bandpass(frequency, q, sample_rate);
    }

    /// Moves the active coefficients one step toward the target.
    #[inline]
    pub fn morph(&mut self) {
        self.active.morph_toward(&self.target, MORPH_ALPHA);
    }

    /// Processes a single sample (transposed direct form II).
    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        let c = &self.active;
        let y = c.b0 * x + self.z1;
        self.z1 = c.b1 * x - c.a1 * y + self.z2;
        self.z2 = c.b2 * x - c.a2 * y;
        y
    }

    /// Coefficients currently used for processing.
    pub fn active(&self) -> &BiquadCoeffs {
        &self.active
    }

    /// Coefficients the active set is gliding toward.
    pub fn target(&self) -> &BiquadCoeffs {
        &self.target
    }

    /// Filter memory `(z1, z2)`.
    pub fn state(&self) -> (f32, f32) {
        (self.z1, self.z2)
    }
}

/// Bank of three parallel formant resonators (F1, F2, F3).
///
/// Created zeroed: all coefficients and state start at 0, so the first
/// processed blocks fade in as the active coefficients approach their
/// targets. State is never reset afterwards.
#[derive(Debug, Clone, Default)]
pub struct FormantBank {
    bands: [ResonatorBand; FORMANT_COUNT],
}

impl FormantBank {
    /// Creates a zeroed bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retargets all three bands for the given formant frequencies.
    pub fn set_targets(&mut self, frequencies: &[f32; FORMANT_COUNT], q: f32, sample_rate: f32) {
        for (band, &frequency) in self.bands.iter_mut().zip(frequencies) {
            band.set_target(frequency, q, sample_rate);
        }
    }

    /// Advances every band's coefficient glide by one block.
    pub fn morph(&mut self) {
        for band in &mut self.bands {
            band.morph();
        }
    }

    /// Processes one sample through all bands and returns the sum.
    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        let [b1, b2, b3] = &mut self.bands;
        b1.process(x) + b2.process(x) + b3.process(x)
    }

    /// The three bands.
    pub fn bands(&self) -> &[ResonatorBand; FORMANT_COUNT] {
        &self.bands
    }
}
