//! Voxform Parameter Model
//!
//! This crate provides the types, ranges, and validation for the parameters
//! that drive the Voxform formant filter. A [`FormantParams`] value is a
//! complete, serializable preset: the DSP backend applies it through its
//! clamping setters, and the CLI loads it from JSON.
//!
//! # Example
//!
//! ```
//! use voxform_spec::{FormantParams, Vowel, VoiceType};
//!
//! let params = FormantParams {
//!     vowel: Vowel::I.position(),
//!     voice_morph: VoiceType::Female.morph(),
//!     q: 8.0,
//!     ..FormantParams::default()
//! };
//!
//! let result = params.validate();
//! assert!(result.is_ok());
//! assert!(result.warnings.is_empty());
//!
//! let json = params.to_json_pretty().unwrap();
//! let parsed = FormantParams::from_json(&json).unwrap();
//! assert_eq!(parsed, params);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error and warning types for preset validation
//! - [`params`]: The preset type, parameter ranges, and defaults
//! - [`validation`]: Preset validation
//! - [`vowel`]: Named vowel and voice-type positions

pub mod error;
pub mod params;
pub mod validation;
pub mod vowel;

pub use error::{
    ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
pub use params::{ConsonantLevels, FormantParams, ParamRange};
pub use vowel::{VoiceType, Vowel};
