//! Tests for the WAV module.

use std::io::Cursor;

use pretty_assertions::assert_eq;

use super::*;
use crate::error::AudioError;
use crate::SAMPLE_RATE_HZ;

fn hound_wav<F>(spec: hound::WavSpec, write: F) -> Vec<u8>
where
    F: FnOnce(&mut hound::WavWriter<&mut Cursor<Vec<u8>>>),
{
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        write(&mut writer);
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

fn int_spec(channels: u16, bits: u16, sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: bits,
        sample_format: hound::SampleFormat::Int,
    }
}

// =========================================================================
// Writer
// =========================================================================

#[test]
fn test_header_layout() {
    let wav = write_wav_to_vec(&WavFormat::host(), &pcm16_bytes(&[1, -1, 300]));
    assert_eq!(wav.len(), WAV_HEADER_LEN + 6);
    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(u32::from_le_bytes(wav[4..8].try_into().unwrap()), 36 + 6);
    assert_eq!(&wav[8..16], b"WAVEfmt ");
    assert_eq!(u16::from_le_bytes([wav[22], wav[23]]), 1);
    assert_eq!(
        u32::from_le_bytes(wav[24..28].try_into().unwrap()),
        SAMPLE_RATE_HZ
    );
    assert_eq!(
        u32::from_le_bytes(wav[28..32].try_into().unwrap()),
        SAMPLE_RATE_HZ * 2
    );
    assert_eq!(u16::from_le_bytes([wav[32], wav[33]]), 2);
    assert_eq!(u16::from_le_bytes([wav[34], wav[35]]), 16);
    assert_eq!(&wav[36..40], b"data");
    assert_eq!(&wav[44..], &[1, 0, 0xff, 0xff, 0x2c, 0x01]);
}

#[test]
fn test_write_wav_matches_vec() {
    let pcm = pcm16_bytes(&[5, 6, 7]);
    let mut out = Vec::new();
    write_wav(&mut out, &WavFormat::host(), &pcm).unwrap();
    assert_eq!(out, write_wav_to_vec(&WavFormat::host(), &pcm));
}

#[test]
fn test_output_is_readable_by_hound() {
    let samples = [0i16, 1000, -1000, i16::MAX, i16::MIN];
    let result = WavResult::from_samples(&samples);

    let reader = hound::WavReader::new(Cursor::new(&result.wav_data)).unwrap();
    assert_eq!(reader.spec(), int_spec(1, 16, SAMPLE_RATE_HZ));
    let decoded: Vec<i16> = reader.into_samples::<i16>().map(Result::unwrap).collect();
    assert_eq!(decoded, samples);
}

#[test]
fn test_identical_samples_identical_files() {
    let samples: Vec<i16> = (0..500).map(|i| (i * 37 % 2000) as i16).collect();
    let a = WavResult::from_samples(&samples);
    let b = WavResult::from_samples(&samples);
    assert_eq!(a.wav_data, b.wav_data);
    assert_eq!(a.pcm_hash, b.pcm_hash);
}

#[test]
fn test_duration() {
    let result = WavResult::from_samples(&vec![0; SAMPLE_RATE_HZ as usize / 2]);
    assert!((result.duration_seconds() - 0.5).abs() < 1e-12);
}

// =========================================================================
// PCM extraction and hashing
// =========================================================================

#[test]
fn test_pcm_hash_matches_file_hash() {
    let samples = [3i16, -3, 99, 12_000];
    let result = WavResult::from_samples(&samples);
    assert_eq!(compute_pcm_hash(&result.wav_data), Some(pcm_hash(&samples)));
    assert_eq!(result.pcm_hash, pcm_hash(&samples));
    assert_eq!(result.pcm_hash.len(), 64);
}

#[test]
fn test_pcm_hash_differs_for_different_samples() {
    assert_ne!(pcm_hash(&[1, 2, 3]), pcm_hash(&[1, 2, 4]));
}

#[test]
fn test_extract_skips_unknown_chunks() {
    let mut wav = write_wav_to_vec(&WavFormat::host(), &pcm16_bytes(&[7, 8]));
    // Splice an odd-sized LIST chunk (plus pad byte) before the data chunk.
    let data_chunk = wav.split_off(36);
    wav.extend_from_slice(b"LIST");
    wav.extend_from_slice(&3u32.to_le_bytes());
    wav.extend_from_slice(&[1, 2, 3, 0]);
    wav.extend_from_slice(&data_chunk);

    assert_eq!(extract_pcm_data(&wav), Some(&[7u8, 0, 8, 0][..]));
}

#[test]
fn test_extract_rejects_invalid() {
    assert_eq!(extract_pcm_data(b"not a wav file at all"), None);
    assert_eq!(compute_pcm_hash(&[]), None);

    let mut truncated = write_wav_to_vec(&WavFormat::host(), &pcm16_bytes(&[1, 2, 3]));
    truncated.truncate(truncated.len() - 1);
    assert_eq!(extract_pcm_data(&truncated), None);
}

// =========================================================================
// Reader
// =========================================================================

#[test]
fn test_read_mono_16() {
    let wav = hound_wav(int_spec(1, 16, SAMPLE_RATE_HZ), |w| {
        for s in [10i16, -20, 30] {
            w.write_sample(s).unwrap();
        }
    });
    assert_eq!(read_wav(Cursor::new(wav)).unwrap(), vec![10, -20, 30]);
}

#[test]
fn test_read_stereo_downmix() {
    let wav = hound_wav(int_spec(2, 16, SAMPLE_RATE_HZ), |w| {
        for s in [100i16, 300, -50, -150, 7, 8] {
            w.write_sample(s).unwrap();
        }
    });
    assert_eq!(read_wav(Cursor::new(wav)).unwrap(), vec![200, -100, 7]);
}

#[test]
fn test_read_24_bit() {
    let wav = hound_wav(int_spec(1, 24, SAMPLE_RATE_HZ), |w| {
        w.write_sample(0x10_0000i32).unwrap();
        w.write_sample(-0x80_0000i32).unwrap();
    });
    assert_eq!(read_wav(Cursor::new(wav)).unwrap(), vec![0x1000, i16::MIN]);
}

#[test]
fn test_read_float() {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE_HZ,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let wav = hound_wav(spec, |w| {
        for s in [0.0f32, 1.0, -2.0] {
            w.write_sample(s).unwrap();
        }
    });
    assert_eq!(
        read_wav(Cursor::new(wav)).unwrap(),
        vec![0, i16::MAX, -i16::MAX]
    );
}

#[test]
fn test_read_rejects_other_rates() {
    let wav = hound_wav(int_spec(1, 16, 48_000), |w| w.write_sample(0i16).unwrap());
    let err = read_wav(Cursor::new(wav)).unwrap_err();
    assert!(matches!(
        err,
        AudioError::SampleRateMismatch {
            expected: 44_100,
            found: 48_000
        }
    ));
    assert_eq!(err.code(), "AUDIO_003");
}

#[test]
fn test_read_rejects_garbage() {
    let err = read_wav(Cursor::new(b"garbage".to_vec())).unwrap_err();
    assert!(matches!(err, AudioError::Wav(_)));
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.wav");
    let samples = [1i16, 2, 3, -4];

    WavResult::from_samples(&samples).write_to(&path).unwrap();
    assert_eq!(read_wav_file(&path).unwrap(), samples);
}

#[test]
fn test_read_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_wav_file(&dir.path().join("missing.wav")).unwrap_err();
    assert!(matches!(err, AudioError::Io(_)));
}
