//! Languages with a shipped bundle.

use std::fmt;

/// A language whose bundle is compiled into the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Polish,
}

impl Language {
    pub const ALL: [Self; 1] = [Self::Polish];

    /// ISO 639-1 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Polish => "pl",
        }
    }

    /// Value of the bundle's `CLASS_NAME` entry.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Polish => "otp.locale.Polish",
        }
    }

    /// Resolves a language code such as `pl`, `pl-PL` or `pl_pl`.
    ///
    /// A region suffix is accepted for any shipped language.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = normalize_language_code(code);
        let primary = normalized.split('_').next().unwrap_or_default();

        Self::ALL.into_iter().find(|language| language.code() == primary)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Normalize language code (lowercase and replace - with _)
fn normalize_language_code(code: &str) -> String {
    code.trim().to_lowercase().replace('-', "_")
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("pl", Some(Language::Polish))]
    #[case("PL", Some(Language::Polish))]
    #[case("pl-PL", Some(Language::Polish))]
    #[case("pl_pl", Some(Language::Polish))]
    #[case(" pl ", Some(Language::Polish))]
    #[case("en", None)]
    #[case("pla", None)]
    #[case("", None)]
    fn from_code_normalizes(#[case] code: &str, #[case] expected: Option<Language>) {
        assert_that!(Language::from_code(code), eq(expected));
    }

    #[rstest]
    fn polish_identity() {
        assert_that!(Language::Polish.code(), eq("pl"));
        assert_that!(Language::Polish.class_name(), eq("otp.locale.Polish"));
        assert_that!(Language::default(), eq(Language::Polish));
    }

    #[rstest]
    #[case("en", "en")]
    #[case("ja-JP", "ja_jp")]
    #[case("EN-us", "en_us")]
    fn normalize_language_code_test(#[case] input: &str, #[case] expected: &str) {
        assert_that!(normalize_language_code(input), eq(expected));
    }
}
