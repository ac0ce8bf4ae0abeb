//! WAV serialization.

use std::io::{self, Write};

use super::format::WavFormat;

/// Size of the RIFF/fmt/data header written by [`write_wav`].
pub const WAV_HEADER_LEN: usize = 44;

/// Writes a complete WAV file: RIFF header, 16-byte PCM `fmt ` chunk,
/// and a single `data` chunk.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    writer.write_all(&header(format, pcm_data.len() as u32))?;
    writer.write_all(pcm_data)
}

/// Writes a WAV file to a byte vector.
pub fn write_wav_to_vec(format: &WavFormat, pcm_data: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(WAV_HEADER_LEN + pcm_data.len());
    buffer.extend_from_slice(&header(format, pcm_data.len() as u32));
    buffer.extend_from_slice(pcm_data);
    buffer
}

/// Little-endian bytes of 16-bit samples.
pub fn pcm16_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

fn header(format: &WavFormat, data_size: u32) -> [u8; WAV_HEADER_LEN] {
    // RIFF size excludes the 8-byte RIFF preamble.
    let file_size = (WAV_HEADER_LEN as u32 - 8) + data_size;

    let mut h = [0u8; WAV_HEADER_LEN];
    h[0..4].copy_from_slice(b"RIFF");
    h[4..8].copy_from_slice(&file_size.to_le_bytes());
    h[8..12].copy_from_slice(b"WAVE");

    h[12..16].copy_from_slice(b"fmt ");
    h[16..20].copy_from_slice(&16u32.to_le_bytes());
    h[20..22].copy_from_slice(&1u16.to_le_bytes()); // PCM
    h[22..24].copy_from_slice(&format.channels.to_le_bytes());
    h[24..28].copy_from_slice(&format.sample_rate.to_le_bytes());
    h[28..32].copy_from_slice(&format.byte_rate().to_le_bytes());
    h[32..34].copy_from_slice(&format.block_align().to_le_bytes());
    h[34..36].copy_from_slice(&format.bits_per_sample.to_le_bytes());

    h[36..40].copy_from_slice(b"data");
    h[40..44].copy_from_slice(&data_size.to_le_bytes());
    h
}
