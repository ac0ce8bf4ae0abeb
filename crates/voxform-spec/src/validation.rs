//! Preset validation.
//!
//! Setters never reject input, so out-of-range values are only warnings:
//! they describe what the filter will actually do. NaN and infinities are
//! errors because a preset carrying them cannot have been intended.

use crate::error::{
    ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
use crate::params::FormantParams;

impl FormantParams {
    /// Validates the preset, reporting non-finite values as errors and
    /// values the setters would clamp as warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        for (name, value, range) in self.ranged_fields() {
            if !value.is_finite() {
                result.add_error(ValidationError::with_path(
                    ErrorCode::NonFiniteValue,
                    format!("value must be finite, got {}", value),
                    name,
                ));
            } else if !range.contains(value) {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::OutOfRange,
                    format!(
                        "{} is outside [{}, {}] and will be clamped to {}",
                        value,
                        range.min,
                        range.max,
                        range.clamp(value)
                    ),
                    name,
                ));
            }
        }

        if !self.gain.is_finite() {
            result.add_error(ValidationError::with_path(
                ErrorCode::NonFiniteValue,
                format!("value must be finite, got {}", self.gain),
                "gain",
            ));
        }

        // Modulation depth is only audible when the wet path runs.
        if self.is_bypassed() && (self.vowel_mod_depth > 0.0 || self.brightness_mod_depth > 0.0) {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::InertModulation,
                "modulation depth has no effect while bypassed or fully dry",
                if self.vowel_mod_depth > 0.0 {
                    "vowel_mod_depth"
                } else {
                    "brightness_mod_depth"
                },
            ));
        }

        result
    }

    /// Validates and fails on any error, returning the warnings otherwise.
    pub fn check(&self) -> Result<Vec<ValidationWarning>, SpecError> {
        self.validate()
            .into_result()
            .map_err(|errors| SpecError::ValidationFailed(errors.len()))
    }
}
