//! Deterministic WAV output and WAV input.
//!
//! Output files are mono 16-bit PCM at the host rate with a fixed 44-byte
//! header and no timestamps or other variable metadata, so identical
//! samples always produce identical files. The BLAKE3 hash of the PCM
//! payload identifies a render independently of the container.

mod format;
mod pcm;
mod reader;
mod result;
mod writer;

#[cfg(test)]
mod tests;

pub use format::WavFormat;
pub use pcm::{compute_pcm_hash, extract_pcm_data, pcm_hash};
pub use reader::{read_wav, read_wav_file};
pub use result::WavResult;
pub use writer::{pcm16_bytes, write_wav, write_wav_to_vec, WAV_HEADER_LEN};
