//! Seams to the host audio graph.
//!
//! The host owns scheduling and block memory. A node sees both through a
//! [`BlockPool`]: it receives read-only input blocks per port, allocates an
//! output block, transmits it downstream, and releases every block it
//! obtained exactly once before `update` returns.

use crate::AUDIO_BLOCK_SAMPLES;

/// One block of signed 16-bit PCM samples.
pub type AudioBlock = [i16; AUDIO_BLOCK_SAMPLES];

/// Audio input port.
pub const AUDIO_PORT: usize = 0;

/// Vowel modulation input port.
pub const VOWEL_MOD_PORT: usize = 1;

/// Brightness modulation input port.
pub const BRIGHTNESS_MOD_PORT: usize = 2;

/// Fixed-size block memory and routing provided by the host.
///
/// Both acquisition methods may fail at any time; callers treat `None` as
/// "skip this cycle", never as an error.
pub trait BlockPool {
    /// Handle to one pooled block.
    type Block: AsRef<AudioBlock> + AsMut<AudioBlock>;

    /// Takes the block waiting on an input port, if any.
    fn receive_read_only(&mut self, port: usize) -> Option<Self::Block>;

    /// Allocates a writable block.
    fn allocate(&mut self) -> Option<Self::Block>;

    /// Sends a block downstream on an output port.
    fn transmit(&mut self, block: &Self::Block, port: usize);

    /// Returns ownership of a block to the pool.
    fn release(&mut self, block: Self::Block);
}

/// A processing node invoked once per block by the host scheduler.
pub trait StreamNode {
    /// Number of input ports the node reads.
    const INPUTS: usize;

    /// Processes one block. Must not block or allocate on the heap and
    /// must release every block it obtains.
    fn update<P: BlockPool>(&mut self, pool: &mut P);
}

/// Mean of a block normalized to full scale, in [-1, 1).
#[inline]
pub fn block_mean(block: &AudioBlock) -> f32 {
    let sum: i32 = block.iter().map(|&s| s as i32).sum();
    sum as f32 / (32_768.0 * AUDIO_BLOCK_SAMPLES as f32)
}
