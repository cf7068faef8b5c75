//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::loader::{
    self,
    LoadedSettings,
};
use super::{
    ConfigError,
    LocaleSettings,
    ValidationError,
};
use crate::locale::Language;

/// 検証済みの設定と、そこから解決した言語を保持する
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigManager {
    /// 検証済みの設定
    settings: LocaleSettings,

    /// `settings.language` から解決した言語
    language: Language,

    /// 設定の読み込み元 (デフォルト値の場合は `None`)
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// `start` から設定ファイルを探して読み込み、検証する
    ///
    /// `start` が `None`、または設定ファイルが見つからない場合はデフォルト値を使う。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load(start: Option<&Path>) -> Result<Self, ConfigError> {
        let LoadedSettings { settings, source } = loader::load_settings(start)?;
        let manager = Self::from_settings(settings, source)?;

        tracing::debug!(
            language = %manager.language,
            separator = %manager.settings.key_separator,
            source = ?manager.source,
            "Settings loaded"
        );
        Ok(manager)
    }

    /// 設定を検証して言語を解決する
    fn from_settings(settings: LocaleSettings, source: Option<PathBuf>) -> Result<Self, ConfigError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        let language = settings.resolved_language().ok_or_else(|| {
            ConfigError::ValidationErrors(vec![ValidationError::new(
                "language",
                format!("Unknown language '{}'", settings.language),
            )])
        })?;

        Ok(Self { settings, language, source })
    }

    #[must_use]
    pub const fn settings(&self) -> &LocaleSettings {
        &self.settings
    }

    /// 提供する言語
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// キーパスの区切り文字
    #[must_use]
    pub fn key_separator(&self) -> &str {
        &self.settings.key_separator
    }

    /// 設定ファイルのパス
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::loader::CONFIG_FILE_NAME;

    /// load: 探索開始位置がない場合はデフォルト値
    #[rstest]
    fn test_load_without_start_uses_defaults() {
        let manager = ConfigManager::load(None).unwrap();

        assert_eq!(manager, ConfigManager::default());
        assert_eq!(manager.key_separator(), ".");
        assert_eq!(manager.language(), Language::Polish);
        assert!(manager.source().is_none());
    }

    /// load: 地域付きの言語コードを解決する
    #[rstest]
    fn test_load_resolves_language_with_region() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r#"{"keySeparator": "/", "language": "pl_PL"}"#,
        )
        .unwrap();

        let manager = ConfigManager::load(Some(temp_dir.path())).unwrap();

        assert_eq!(manager.key_separator(), "/");
        assert_eq!(manager.language(), Language::Polish);
        assert_eq!(manager.settings().language, "pl_PL");
        assert_eq!(manager.source(), Some(temp_dir.path().join(CONFIG_FILE_NAME).as_path()));
    }

    /// load: 親ディレクトリの設定ファイルを使う
    #[rstest]
    fn test_load_from_nested_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("client").join("src");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"keySeparator": ":"}"#).unwrap();

        let manager = ConfigManager::load(Some(&nested)).unwrap();

        assert_eq!(manager.key_separator(), ":");
        assert_eq!(manager.source(), Some(temp_dir.path().join(CONFIG_FILE_NAME).as_path()));
    }

    /// load: 未知の言語はバリデーションエラー
    #[rstest]
    fn test_load_rejects_unknown_language() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"language": "xx"}"#).unwrap();

        let result = ConfigManager::load(Some(temp_dir.path()));

        let Err(ConfigError::ValidationErrors(errors)) = result else {
            unreachable!("expected validation errors");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().map(|e| e.field_path.as_str()), Some("language"));
    }

    /// load: 空の区切り文字はバリデーションエラー
    #[rstest]
    fn test_load_rejects_empty_separator() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"keySeparator": ""}"#).unwrap();

        let result = ConfigManager::load(Some(temp_dir.path()));

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
    }
}
