//! Bundles compiled into the crate.

use std::sync::LazyLock;

use super::language::Language;
use crate::bundle::{
    BundleError,
    LocaleBundle,
};
use crate::schema::validate_shape;

/// Polish bundle source, clean UTF-8.
const POLISH_JSON: &str = include_str!("../../locales/pl.json");

/// Parsed once on first access and never mutated afterwards.
static POLISH: LazyLock<Result<LocaleBundle, BundleError>> =
    LazyLock::new(|| load_bundle(Language::Polish, POLISH_JSON));

/// Parses and validates a bundle for `language`.
///
/// The result must match the shared bundle shape and carry the language's
/// class name.
pub fn load_bundle(language: Language, text: &str) -> Result<LocaleBundle, BundleError> {
    tracing::debug!(language = %language, "Loading locale bundle");

    let bundle = LocaleBundle::from_json_str(text)?;

    validate_shape(&bundle).map_err(|errors| BundleError::Shape {
        language: language.code().to_string(),
        errors,
    })?;

    let class_name = bundle.text("CLASS_NAME");
    if class_name != Some(language.class_name()) {
        return Err(BundleError::Structure {
            path: "CLASS_NAME".to_string(),
            message: format!(
                "expected '{}', found {:?}",
                language.class_name(),
                class_name.unwrap_or_default()
            ),
        });
    }

    tracing::debug!(language = %language, sections = bundle.len(), "Locale bundle loaded");
    Ok(bundle)
}

/// The shipped bundle for `language`.
pub fn bundle(language: Language) -> Result<&'static LocaleBundle, BundleError> {
    let cell = match language {
        Language::Polish => &POLISH,
    };
    LazyLock::force(cell).as_ref().map_err(Clone::clone)
}

/// Shorthand for the Polish bundle.
pub fn polish() -> Result<&'static LocaleBundle, BundleError> {
    bundle(Language::Polish)
}
