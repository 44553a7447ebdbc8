//! Storage configuration.
//!
//! 構築時に一度だけ渡され、以後は変更されません。
//! JSON ファイルから serde で読み込みます。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, StorageError};

/// 対応しているストレージバックエンド（閉じた集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    S3,
    Google,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::S3 => "s3",
            BackendKind::Google => "google",
        }
    }
}

impl FromStr for BackendKind {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "s3" => Ok(BackendKind::S3),
            "google" => Ok(BackendKind::Google),
            other => Err(StorageError::UnsupportedBackend(other.to_string())),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// S3 互換ストレージの設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Config {
    pub bucket: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// MinIO などの S3 互換エンドポイント
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,

    #[serde(default)]
    pub allow_http: bool,
}

impl S3Config {
    pub fn for_bucket(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Default::default()
        }
    }
}

/// Google Cloud Storage の設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcsConfig {
    pub bucket: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_path: Option<String>,

    /// サービスアカウント JSON の中身
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_key: Option<String>,
}

/// Storage facade の設定
///
/// `storage_backend` は文字列のまま保持し、facade 構築時に検証します
/// （未対応の値をエラーメッセージにそのまま出すため）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub storage_backend: String,

    #[serde(default)]
    pub storage_prefix: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3: Option<S3Config>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_storage: Option<GcsConfig>,
}

impl StorageConfig {
    pub fn s3(prefix: impl Into<String>, s3: S3Config) -> Self {
        Self {
            storage_backend: BackendKind::S3.to_string(),
            storage_prefix: prefix.into(),
            s3: Some(s3),
            google_storage: None,
        }
    }

    pub fn google(prefix: impl Into<String>, gcs: GcsConfig) -> Self {
        Self {
            storage_backend: BackendKind::Google.to_string(),
            storage_prefix: prefix.into(),
            s3: None,
            google_storage: Some(gcs),
        }
    }

    /// `storage_backend` を BackendKind に解決する
    pub fn backend_kind(&self) -> Result<BackendKind> {
        self.storage_backend.parse()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| StorageError::Config(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }
}

/// ランタイムイメージの保存場所
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub runtime_storage: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_bucket: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_bucket: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleAccount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

/// worker 全体の設定（`get_runtime_info` が読む部分）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageConfig>,

    pub runtime: RuntimeConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_account: Option<GoogleAccount>,
}

impl ExecutorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| StorageError::Config(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| StorageError::Config(format!("read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| StorageError::Config(format!("parse {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("s3", BackendKind::S3)]
    #[case("google", BackendKind::Google)]
    fn backend_kind_parses(#[case] tag: &str, #[case] expected: BackendKind) {
        assert_eq!(tag.parse::<BackendKind>().unwrap(), expected);
        assert_eq!(expected.to_string(), tag);
    }

    #[rstest]
    #[case("azure")]
    #[case("S3")]
    #[case("")]
    fn unknown_backend_is_rejected(#[case] tag: &str) {
        let err = tag.parse::<BackendKind>().unwrap_err();
        assert!(matches!(err, StorageError::UnsupportedBackend(v) if v == tag));
    }

    #[test]
    fn storage_config_from_json() {
        let config = StorageConfig::from_json_str(
            r#"{"storage_backend": "s3", "storage_prefix": "jobs", "s3": {"bucket": "b"}}"#,
        )
        .unwrap();
        assert_eq!(config.backend_kind().unwrap(), BackendKind::S3);
        assert_eq!(config.storage_prefix, "jobs");
        assert_eq!(config.s3, Some(S3Config::for_bucket("b")));
        assert!(config.google_storage.is_none());
    }

    #[test]
    fn storage_config_keeps_unknown_backend_as_text() {
        let config =
            StorageConfig::from_json_str(r#"{"storage_backend": "azure", "storage_prefix": "p"}"#)
                .unwrap();
        assert_eq!(config.storage_backend, "azure");
        assert!(config.backend_kind().is_err());
    }

    #[test]
    fn executor_config_from_json() {
        let config = ExecutorConfig::from_json_str(
            r#"{
                "runtime": {
                    "runtime_storage": "google",
                    "google_bucket": "rt",
                    "google_key": "img/v1.tar.gz"
                },
                "google_account": {"project": "proj"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.runtime.runtime_storage, "google");
        assert_eq!(config.runtime.google_key.as_deref(), Some("img/v1.tar.gz"));
        assert_eq!(
            config.google_account.and_then(|a| a.project).as_deref(),
            Some("proj")
        );
    }

    #[test]
    fn from_path_reports_missing_file() {
        let err = StorageConfig::from_path("/nonexistent/callstore.json").unwrap_err();
        assert!(matches!(err, StorageError::Config(msg) if msg.contains("/nonexistent/callstore.json")));
    }
}
