//! Voxform Formant Filter Backend
//!
//! This crate implements a real-time formant (vowel resonance) filter that
//! processes fixed-size blocks of 16-bit PCM audio:
//!
//! - Three parallel band-pass resonators tuned to interpolated formant tables
//! - Continuous vowel morph (A, E, I, O, U) and voice-type morph (male, female, child)
//! - Brightness control scaling all formants in semitones
//! - Breath and consonant noise excitation
//! - Dry/wet mix, bypass, and audio-rate vowel and brightness modulation inputs
//!
//! # Real-time contract
//!
//! [`FormantProcessor::update`](stream::StreamNode::update) performs no heap
//! allocation, never blocks, and never fails: a missing input or an exhausted
//! block pool skips the cycle's output. Parameters are written through a
//! lock-free [`FormantControls`] handle from any thread.
//!
//! # Determinism
//!
//! Noise excitation comes from a seeded linear congruential generator, so a
//! given input and parameter history always produces the same output.
//!
//! # Example
//!
//! ```
//! use voxform_backend::{render, FormantProcessor, RenderInput};
//! use voxform_spec::{FormantParams, Vowel};
//!
//! let mut processor = FormantProcessor::new();
//! processor.apply(&FormantParams {
//!     vowel: Vowel::O.position(),
//!     q: 8.0,
//!     ..FormantParams::default()
//! });
//!
//! let input = vec![0i16; 1000];
//! let result = render(&mut processor, RenderInput::new(&input)).unwrap();
//! assert_eq!(result.samples.len(), 1000);
//! ```
//!
//! # Crate Structure
//!
//! - [`table`] - Male/female/child formant tables and interpolation
//! - [`params`] - Parameter smoothing and modulation
//! - [`controls`] - Lock-free parameter targets shared with control threads
//! - [`filter`] - Biquad coefficient synthesis, morphing, and the resonator bank
//! - [`excitation`] - Breath and consonant noise excitation
//! - [`rng`] - Deterministic noise generator
//! - [`stream`] - Stream-node and block-pool seams to the host audio graph
//! - [`pool`] - In-memory block pool
//! - [`processor`] - Per-block orchestration
//! - [`render`] - Offline block-by-block rendering
//! - [`wav`] - Deterministic WAV writer and WAV input

pub mod controls;
pub mod error;
pub mod excitation;
pub mod filter;
pub mod params;
pub mod pool;
pub mod processor;
pub mod render;
pub mod rng;
pub mod stream;
pub mod table;
pub mod wav;

/// Samples per block.
pub const AUDIO_BLOCK_SAMPLES: usize = 128;

/// Host sample rate in Hz.
pub const SAMPLE_RATE_HZ: u32 = 44_100;

/// Host sample rate as a float.
pub const SAMPLE_RATE: f32 = SAMPLE_RATE_HZ as f32;

// Re-export main types at crate root
pub use controls::FormantControls;
pub use error::{AudioError, AudioResult, PoolError};
pub use pool::MemoryPool;
pub use processor::{FormantProcessor, ProcessorStats};
pub use render::{render, RenderInput, RenderResult};
pub use stream::{AudioBlock, BlockPool, StreamNode};
