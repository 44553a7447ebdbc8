//! Status records and runtime metadata.
//!
//! status.json とランタイムのメタデータはどちらも ASCII の JSON オブジェクト。
//! 中身のスキーマは worker 側の責任なので、ここでは Map のまま扱います。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::config::BackendKind;
use crate::error::{Result, StorageError};

/// 1 call の status（status.json の中身）
pub type CallStatus = Map<String, Value>;

/// ランタイムイメージのメタデータ（`*.meta.json` の中身）
pub type RuntimeMeta = Map<String, Value>;

/// 使用中のストレージの情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageInfo {
    pub service: BackendKind,
    pub location: String,
}

/// ASCII として decode してから JSON オブジェクトとして parse する
pub fn parse_ascii_json(key: &str, body: &[u8]) -> Result<Map<String, Value>> {
    if !body.is_ascii() {
        return Err(StorageError::Encoding {
            key: key.to_string(),
        });
    }
    Ok(serde_json::from_slice(body)?)
}
