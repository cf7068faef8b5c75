use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::bundle::DEFAULT_KEY_SEPARATOR;
use crate::locale::Language;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "keySeparator")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocaleSettings {
    /// Separator between keys in lookup paths.
    pub key_separator: String,

    /// Code of the bundle to serve (e.g., "pl", "pl-PL").
    pub language: String,
}

impl LocaleSettings {
    /// # Errors
    /// - Empty separator
    /// - Separator containing index brackets
    /// - Language without a shipped bundle
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        } else if self.key_separator.contains(['[', ']']) {
            errors.push(ValidationError::new(
                "keySeparator",
                format!(
                    "The separator '{}' cannot contain '[' or ']', which are reserved for indexes",
                    self.key_separator
                ),
            ));
        }

        if self.resolved_language().is_none() {
            let known =
                Language::ALL.iter().map(|language| language.code()).collect::<Vec<_>>().join(", ");
            errors.push(ValidationError::new(
                "language",
                format!("Unknown language '{}'. Available: {known}", self.language),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Language named by `language`, if a bundle ships for it.
    #[must_use]
    pub fn resolved_language(&self) -> Option<Language> {
        Language::from_code(&self.language)
    }
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            key_separator: DEFAULT_KEY_SEPARATOR.to_string(),
            language: Language::default().code().to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = LocaleSettings::default();

        assert_that!(settings.validate(), ok(anything()));
        assert_that!(settings.resolved_language(), some(eq(Language::Polish)));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"keySeparator": "/"}"#;

        let settings: LocaleSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.key_separator, eq("/"));
        assert_that!(settings.language, eq("pl"));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let settings: LocaleSettings = serde_json::from_str("{}").unwrap();

        assert_that!(settings, eq(&LocaleSettings::default()));
    }

    #[rstest]
    fn validate_invalid_key_separator_empty() {
        let settings = LocaleSettings { key_separator: String::new(), ..LocaleSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("keySeparator")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    #[case("[")]
    #[case("]")]
    #[case(".[")]
    fn validate_invalid_key_separator_brackets(#[case] separator: &str) {
        let settings =
            LocaleSettings { key_separator: separator.to_string(), ..LocaleSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("keySeparator")),
                field!(ValidationError.message, contains_substring("reserved for indexes"))
            ]])
        );
    }

    #[rstest]
    fn validate_unknown_language() {
        let settings = LocaleSettings { language: "xx".to_string(), ..LocaleSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("language")),
                field!(ValidationError.message, contains_substring("Unknown language 'xx'")),
                field!(ValidationError.message, contains_substring("Available: pl"))
            ]])
        );
    }

    #[rstest]
    fn validate_accepts_region_suffix() {
        let settings = LocaleSettings { language: "pl-PL".to_string(), ..LocaleSettings::default() };

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = LocaleSettings { key_separator: String::new(), language: "xx".to_string() };

        let errors = settings.validate().unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. keySeparator"));
        assert_that!(error_message, contains_substring("cannot be empty"));
        assert_that!(error_message, contains_substring("2. language"));
        assert_that!(error_message, contains_substring("Unknown language"));
    }
}
