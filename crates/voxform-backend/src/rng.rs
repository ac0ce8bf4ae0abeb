//! Deterministic noise generator.
//!
//! Excitation noise comes from a 32-bit linear congruential generator
//! (`seed = seed * 1664525 + 1013904223`). It is fast enough to run once per
//! sample on the audio path and fully reproducible for a given seed. The
//! generator implements [`rand::RngCore`] so it can also feed anything in the
//! `rand` ecosystem.

use rand::{RngCore, SeedableRng};

/// Seed used by [`NoiseGenerator::default`].
pub const DEFAULT_NOISE_SEED: u32 = 22_222;

const LCG_MULTIPLIER: u32 = 1_664_525;
const LCG_INCREMENT: u32 = 1_013_904_223;

/// Scale for a signed 24-bit value to [-1, 1).
const NOISE_SCALE: f32 = 1.0 / 8_388_608.0;

/// 32-bit LCG noise source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoiseGenerator {
    seed: u32,
}

impl NoiseGenerator {
    /// Creates a generator from a 32-bit seed.
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Current generator state.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Advances the generator and returns the raw state.
    #[inline]
    pub fn next_raw(&mut self) -> u32 {
        self.seed = self
            .seed
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.seed
    }

    /// Next noise sample in [-1, 1), taken from the upper 24 bits.
    #[inline]
    pub fn next_noise(&mut self) -> f32 {
        let upper = (self.next_raw() as i32) >> 8;
        upper as f32 * NOISE_SCALE
    }
}

impl Default for NoiseGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_SEED)
    }
}

impl RngCore for NoiseGenerator {
    fn next_u32(&mut self) -> u32 {
        self.next_raw()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_raw() as u64;
        let lo = self.next_raw() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_raw().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for NoiseGenerator {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
