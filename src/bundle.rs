//! Locale bundle: an immutable tree of strings, lists and option pairs.

/// Bundle and lookup error types
mod error;
/// JSON resource parsing
mod json;
/// Key path grammar
mod key_path;
/// Value types and lookup
mod value;

pub use error::{
    BundleError,
    LookupError,
};
pub use key_path::{
    DEFAULT_KEY_SEPARATOR,
    KeyPath,
    KeyPathError,
    Segment,
    is_child_key,
};
pub use value::{
    LocaleBundle,
    LocaleValue,
    OptionPair,
    Resolved,
    ValueKind,
};
