//! Shipped languages and their embedded bundles.

/// Compiled-in bundles
mod catalog;
/// Language codes
mod language;

pub use catalog::{
    bundle,
    load_bundle,
    polish,
};
pub use language::Language;
