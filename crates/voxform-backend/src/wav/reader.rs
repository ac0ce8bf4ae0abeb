//! WAV input.
//!
//! Any integer PCM depth from 8 to 32 bits and 32-bit float input is
//! accepted and converted to 16-bit. Multi-channel input is averaged to
//! mono. The filter runs at one fixed rate, so other sample rates are
//! rejected rather than resampled.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::error::{AudioError, AudioResult};
use crate::SAMPLE_RATE_HZ;

/// Reads a WAV stream as mono 16-bit samples.
pub fn read_wav<R: Read>(reader: R) -> AudioResult<Vec<i16>> {
    let mut reader = WavReader::new(reader)?;
    let spec = reader.spec();

    if spec.sample_rate != SAMPLE_RATE_HZ {
        return Err(AudioError::SampleRateMismatch {
            expected: SAMPLE_RATE_HZ,
            found: spec.sample_rate,
        });
    }
    if spec.channels == 0 {
        return Err(AudioError::unsupported("zero channels"));
    }

    let interleaved: Vec<i32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, 8) => reader
            .samples::<i8>()
            .map(|s| s.map(|v| i32::from(v) << 8))
            .collect::<Result<_, _>>()?,
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(i32::from))
            .collect::<Result<_, _>>()?,
        (SampleFormat::Int, bits @ 17..=32) => {
            let shift = bits - 16;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v >> shift))
                .collect::<Result<_, _>>()?
        }
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .map(|s| s.map(|v| (v.clamp(-1.0, 1.0) * 32_767.0) as i32))
            .collect::<Result<_, _>>()?,
        (format, bits) => {
            return Err(AudioError::unsupported(format!(
                "{bits}-bit {format:?} samples"
            )))
        }
    };

    let channels = spec.channels as usize;
    Ok(interleaved
        .chunks_exact(channels)
        .map(|frame| (frame.iter().sum::<i32>() / channels as i32) as i16)
        .collect())
}

/// Reads a WAV file as mono 16-bit samples.
pub fn read_wav_file(path: &Path) -> AudioResult<Vec<i16>> {
    let file = File::open(path)?;
    read_wav(BufReader::new(file))
}
