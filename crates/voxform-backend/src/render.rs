//! Offline block-by-block rendering.
//!
//! Plays the part of the host scheduler: splits input into blocks, parks
//! them on the node's ports in a [`MemoryPool`], calls `update` once per
//! block, and stitches the transmitted blocks back together. Block
//! ownership is audited after every cycle.

use tracing::{debug, info};

use crate::error::{AudioError, AudioResult};
use crate::pool::MemoryPool;
use crate::processor::OUTPUT_PORT;
use crate::stream::{StreamNode, AUDIO_PORT, BRIGHTNESS_MOD_PORT, VOWEL_MOD_PORT};
use crate::wav::pcm_hash;
use crate::AUDIO_BLOCK_SAMPLES;

/// Signals to render.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    /// Audio input.
    pub audio: &'a [i16],
    /// Optional vowel modulation signal.
    pub vowel_mod: Option<&'a [i16]>,
    /// Optional brightness modulation signal.
    pub brightness_mod: Option<&'a [i16]>,
}

impl<'a> RenderInput<'a> {
    /// Audio input with no modulation.
    pub fn new(audio: &'a [i16]) -> Self {
        Self {
            audio,
            vowel_mod: None,
            brightness_mod: None,
        }
    }

    /// Adds a vowel modulation signal.
    pub fn with_vowel_mod(mut self, signal: &'a [i16]) -> Self {
        self.vowel_mod = Some(signal);
        self
    }

    /// Adds a brightness modulation signal.
    pub fn with_brightness_mod(mut self, signal: &'a [i16]) -> Self {
        self.brightness_mod = Some(signal);
        self
    }
}

/// Output of [`render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    /// Output samples, same length as the audio input.
    pub samples: Vec<i16>,
    /// Blocks driven through the node.
    pub blocks: usize,
    /// Cycles in which the node transmitted nothing (rendered as silence).
    pub dropped_blocks: usize,
    /// BLAKE3 hash of `samples` as 16-bit little-endian PCM.
    pub pcm_hash: String,
}

/// Renders `input` through `node`.
///
/// Modulation signals shorter than the audio are zero-padded; longer ones
/// are truncated. Fails only if the node keeps a block past the end of an
/// update.
pub fn render<N: StreamNode>(node: &mut N, input: RenderInput<'_>) -> AudioResult<RenderResult> {
    let total = input.audio.len();
    let blocks = total.div_ceil(AUDIO_BLOCK_SAMPLES);
    info!(samples = total, blocks, "rendering");

    // One block per input port plus one output block.
    let mut pool = MemoryPool::new(N::INPUTS.max(1) + 1, N::INPUTS.max(1));
    let mut samples = Vec::with_capacity(total);
    let mut dropped_blocks = 0;

    for index in 0..blocks {
        let start = index * AUDIO_BLOCK_SAMPLES;
        let end = (start + AUDIO_BLOCK_SAMPLES).min(total);

        pool.queue(AUDIO_PORT, &input.audio[start..end])?;
        if N::INPUTS > VOWEL_MOD_PORT {
            queue_signal(&mut pool, VOWEL_MOD_PORT, input.vowel_mod, start)?;
        }
        if N::INPUTS > BRIGHTNESS_MOD_PORT {
            queue_signal(&mut pool, BRIGHTNESS_MOD_PORT, input.brightness_mod, start)?;
        }

        node.update(&mut pool);

        pool.clear_ports();
        let outstanding = pool.outstanding();
        if outstanding != 0 {
            return Err(AudioError::BlockLeak { outstanding });
        }

        let emitted = pool
            .take_transmitted()
            .into_iter()
            .find(|t| t.port == OUTPUT_PORT);
        match emitted {
            Some(block) => samples.extend_from_slice(&block.samples[..end - start]),
            None => {
                debug!(block = index, "no output, writing silence");
                dropped_blocks += 1;
                samples.resize(end, 0);
            }
        }
    }

    let pcm_hash = pcm_hash(&samples);
    info!(blocks, dropped_blocks, pcm_hash = %pcm_hash, "render complete");

    Ok(RenderResult {
        samples,
        blocks,
        dropped_blocks,
        pcm_hash,
    })
}

/// Queues the slice of `signal` starting at `start`, if there is any.
fn queue_signal(
    pool: &mut MemoryPool,
    port: usize,
    signal: Option<&[i16]>,
    start: usize,
) -> AudioResult<()> {
    if let Some(chunk) = signal.and_then(|s| s.get(start..)) {
        if !chunk.is_empty() {
            pool.queue(port, &chunk[..chunk.len().min(AUDIO_BLOCK_SAMPLES)])?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::BlockPool;
    use crate::FormantProcessor;
    use pretty_assertions::assert_eq;

    /// Passes audio through unchanged.
    struct Passthrough;

    impl StreamNode for Passthrough {
        const INPUTS: usize = 1;

        fn update<P: BlockPool>(&mut self, pool: &mut P) {
            if let Some(input) = pool.receive_read_only(AUDIO_PORT) {
                pool.transmit(&input, OUTPUT_PORT);
                pool.release(input);
            }
        }
    }

    /// Emits only on even cycles.
    struct EveryOther(usize);

    impl StreamNode for EveryOther {
        const INPUTS: usize = 1;

        fn update<P: BlockPool>(&mut self, pool: &mut P) {
            let input = pool.receive_read_only(AUDIO_PORT);
            if self.0 % 2 == 0 {
                if let Some(input) = &input {
                    pool.transmit(input, OUTPUT_PORT);
                }
            }
            if let Some(input) = input {
                pool.release(input);
            }
            self.0 += 1;
        }
    }

    /// Receives a block and never gives it back.
    struct Leaky;

    impl StreamNode for Leaky {
        const INPUTS: usize = 1;

        fn update<P: BlockPool>(&mut self, pool: &mut P) {
            if let Some(block) = pool.receive_read_only(AUDIO_PORT) {
                std::mem::forget(block);
            }
        }
    }

    #[test]
    fn test_passthrough_preserves_length_and_samples() {
        let input: Vec<i16> = (0..300).map(|i| i as i16).collect();
        let result = render(&mut Passthrough, RenderInput::new(&input)).unwrap();
        assert_eq!(result.samples, input);
        assert_eq!(result.blocks, 3);
        assert_eq!(result.dropped_blocks, 0);
        assert_eq!(result.pcm_hash, pcm_hash(&input));
    }

    #[test]
    fn test_empty_input() {
        let result = render(&mut Passthrough, RenderInput::new(&[])).unwrap();
        assert!(result.samples.is_empty());
        assert_eq!(result.blocks, 0);
    }

    #[test]
    fn test_dropped_cycles_become_silence() {
        let input = vec![500i16; 3 * AUDIO_BLOCK_SAMPLES];
        let result = render(&mut EveryOther(0), RenderInput::new(&input)).unwrap();
        assert_eq!(result.dropped_blocks, 1);
        assert!(result.samples[..AUDIO_BLOCK_SAMPLES].iter().all(|&s| s == 500));
        assert!(result.samples[AUDIO_BLOCK_SAMPLES..2 * AUDIO_BLOCK_SAMPLES]
            .iter()
            .all(|&s| s == 0));
        assert!(result.samples[2 * AUDIO_BLOCK_SAMPLES..]
            .iter()
            .all(|&s| s == 500));
    }

    #[test]
    fn test_leak_is_reported() {
        let input = vec![0i16; 10];
        let err = render(&mut Leaky, RenderInput::new(&input)).unwrap_err();
        assert!(matches!(err, AudioError::BlockLeak { outstanding: 1 }));
    }

    #[test]
    fn test_short_modulation_is_accepted() {
        let input = vec![1000i16; 4 * AUDIO_BLOCK_SAMPLES];
        let modulation = vec![20_000i16; 50];
        let mut processor = FormantProcessor::new();
        processor.set_vowel_mod_depth(1.0);
        let result = render(
            &mut processor,
            RenderInput::new(&input)
                .with_vowel_mod(&modulation)
                .with_brightness_mod(&modulation),
        )
        .unwrap();
        assert_eq!(result.samples.len(), input.len());
        assert_eq!(processor.stats().processed, 4);
    }
}
