//! 設定ファイルの探索と読み込み

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    LocaleSettings,
};

/// Name of the settings file looked up in a directory and its ancestors.
pub(super) const CONFIG_FILE_NAME: &str = ".otp-locale.json";

/// 読み込んだ設定と、その読み込み元
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct LoadedSettings {
    pub(super) settings: LocaleSettings,
    /// Settings file the values came from; `None` when defaults were used.
    pub(super) source: Option<PathBuf>,
}

/// `start` から親ディレクトリへ向かって `.otp-locale.json` を探す
///
/// The nearest file wins; directories above it are not consulted.
pub(super) fn find_config_file(start: &Path) -> Option<PathBuf> {
    start.ancestors().map(|dir| dir.join(CONFIG_FILE_NAME)).find(|candidate| candidate.is_file())
}

/// 設定を読み込む
///
/// # Returns
/// - 設定ファイルが見つかった場合: その内容と読み込み元のパス
/// - 見つからない場合 (または `start` が `None`): デフォルト値
pub(super) fn load_settings(start: Option<&Path>) -> Result<LoadedSettings, ConfigError> {
    let Some(path) = start.and_then(find_config_file) else {
        tracing::debug!(?start, "No settings file found, using defaults");
        return Ok(LoadedSettings { settings: LocaleSettings::default(), source: None });
    };

    tracing::debug!(path = %path.display(), "Loading settings");

    let content = std::fs::read_to_string(&path)?;
    let settings: LocaleSettings = serde_json::from_str(&content)?;

    Ok(LoadedSettings { settings, source: Some(path) })
}
