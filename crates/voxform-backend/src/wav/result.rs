//! Rendered WAV file.

use std::fs;
use std::path::Path;

use crate::error::AudioResult;

use super::format::WavFormat;
use super::writer::{pcm16_bytes, write_wav_to_vec};

/// A mono WAV file in memory.
#[derive(Debug, Clone)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM payload.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
}

impl WavResult {
    /// Encodes samples at the host rate.
    pub fn from_samples(samples: &[i16]) -> Self {
        let format = WavFormat::host();
        let pcm = pcm16_bytes(samples);
        let pcm_hash = blake3::hash(&pcm).to_hex().to_string();

        Self {
            wav_data: write_wav_to_vec(&format, &pcm),
            pcm_hash,
            sample_rate: format.sample_rate,
            num_samples: samples.len(),
        }
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }

    /// Writes the file to disk.
    pub fn write_to(&self, path: &Path) -> AudioResult<()> {
        fs::write(path, &self.wav_data)?;
        Ok(())
    }
}
