//! テスト用ユーティリティ関数
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use serde_json::Value;

use crate::bundle::LocaleBundle;

/// テスト用の `LocaleBundle` を JSON から作成する
pub(crate) fn bundle_from(json: &Value) -> LocaleBundle {
    LocaleBundle::from_json_str(&json.to_string()).unwrap()
}
