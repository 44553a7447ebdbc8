//! Errors - ストレージ層のエラー型
//!
//! この層はエラーを翻訳・リトライしません。バックエンドの失敗は
//! `Backend` としてそのまま呼び出し側へ伝播します。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// `storage_backend` / `runtime_storage` が未対応の値
    #[error("using {0} as storage service is not supported yet")]
    UnsupportedBackend(String),

    /// 選択されたバックエンドのサブ設定が無い
    #[error("missing `{0}` section in storage config")]
    MissingConfig(&'static str),

    #[error("object not found: key={key}")]
    NotFound { key: String },

    /// object_store クライアントの失敗（ネットワーク・認証・権限など）
    #[error(transparent)]
    Backend(object_store::Error),

    #[error("object body is not ascii: key={key}")]
    Encoding { key: String },

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}

impl StorageError {
    /// object_store のエラーを変換する。NotFound だけは key 付きで区別する。
    pub(crate) fn from_object_store(key: &str, err: object_store::Error) -> Self {
        match err {
            object_store::Error::NotFound { .. } => StorageError::NotFound {
                key: key.to_string(),
            },
            other => StorageError::Backend(other),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

pub type Result<T, E = StorageError> = std::result::Result<T, E>;
