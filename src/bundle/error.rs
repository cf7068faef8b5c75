use thiserror::Error;

use super::key_path::KeyPathError;
use super::value::ValueKind;
use crate::schema::ShapeError;

/// Errors raised while building a bundle.
///
/// Every variant holds owned strings so a failed embedded load can be handed
/// out to each caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BundleError {
    #[error("Failed to parse locale bundle: {message}")]
    Parse { message: String },

    #[error("Invalid locale value at '{path}': {message}")]
    Structure { path: String, message: String },

    #[error("Duplicate key '{key}' in locale bundle")]
    DuplicateKey { key: String },

    #[error("Locale bundle '{language}' does not have the expected shape:\n{}", format_shape_errors(.errors))]
    Shape { language: String, errors: Vec<ShapeError> },
}

fn format_shape_errors(errors: &[ShapeError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {err}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Errors raised by a key path lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error(transparent)]
    Path(#[from] KeyPathError),

    #[error("Key '{segment}' not found while looking up '{path}'")]
    MissingKey { path: String, segment: String },

    #[error("'{parent}' is {kind} and has no children (looking up '{path}')")]
    NotAContainer { path: String, parent: String, kind: ValueKind },

    #[error("Index '{segment}' is out of range for '{parent}' with {len} items (looking up '{path}')")]
    IndexOutOfRange { path: String, parent: String, segment: String, len: usize },
}
