//! Voxform CLI library.
//!
//! Command implementations for the `voxform` binary: offline rendering of
//! WAV files through the formant filter, formant table inspection, and
//! preset handling.

pub mod commands;
pub mod logging;
