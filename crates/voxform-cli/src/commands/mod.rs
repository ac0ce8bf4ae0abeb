//! CLI command implementations.

pub mod preset;
pub mod render;
pub mod table;

use colored::Colorize;
use voxform_spec::{ValidationError, ValidationWarning};

/// Prints validation warnings in the shared CLI style.
pub(crate) fn print_warnings(warnings: &[ValidationWarning]) {
    for warning in warnings {
        println!("  {} {}", "!".yellow(), warning);
    }
}

/// Prints validation errors in the shared CLI style.
pub(crate) fn print_errors(errors: &[ValidationError]) {
    for error in errors {
        println!("  {} {}", "x".red(), error);
    }
}
