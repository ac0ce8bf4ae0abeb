//! Error types for the audio backend.
//!
//! None of these are produced by the per-block processing path, which
//! degrades by skipping output instead. They cover block-pool misuse,
//! offline rendering, and WAV I/O.

use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors raised by the in-memory block pool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// Port index outside the pool's port count.
    #[error("unknown port {port} (pool has {ports} ports)")]
    UnknownPort {
        /// Requested port.
        port: usize,
        /// Number of ports.
        ports: usize,
    },

    /// A block is already waiting on the port.
    #[error("port {port} already holds an unreceived block")]
    PortBusy {
        /// The busy port.
        port: usize,
    },

    /// Every block is in use.
    #[error("block pool exhausted (capacity {capacity})")]
    Exhausted {
        /// Pool capacity in blocks.
        capacity: usize,
    },
}

/// Errors that can occur outside the real-time path.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Block pool error.
    #[error("block pool error: {0}")]
    Pool(#[from] PoolError),

    /// A node kept blocks past the end of its update.
    #[error("node leaked {outstanding} block(s) after update")]
    BlockLeak {
        /// Blocks still checked out.
        outstanding: usize,
    },

    /// Input sample rate differs from the host rate.
    #[error("sample rate mismatch: expected {expected} Hz, found {found} Hz")]
    SampleRateMismatch {
        /// Host sample rate.
        expected: u32,
        /// Rate found in the input.
        found: u32,
    },

    /// Unsupported WAV encoding.
    #[error("unsupported WAV format: {message}")]
    UnsupportedFormat {
        /// Error message.
        message: String,
    },

    /// WAV decoding error.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Creates an unsupported format error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
        }
    }

    /// Stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            AudioError::Pool(_) => "AUDIO_001",
            AudioError::BlockLeak { .. } => "AUDIO_002",
            AudioError::SampleRateMismatch { .. } => "AUDIO_003",
            AudioError::UnsupportedFormat { .. } => "AUDIO_004",
            AudioError::Wav(_) => "AUDIO_005",
            AudioError::Io(_) => "AUDIO_006",
        }
    }
}
