//! ObjectStoreService - object_store クレートのストアを StorageService として包む
//!
//! S3 / GCS / インメモリのどれでも同じコードパスを通ります。
//! プロバイダごとの違いはストアの組み立て（`s3.rs`, `gcs.rs`）だけです。

use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::ObjectStore;
use object_store::path::Path;
use std::sync::Arc;

use crate::domain::CallStatus;
use crate::domain::status::parse_ascii_json;
use crate::error::{Result, StorageError};
use crate::ports::StorageService;

pub struct ObjectStoreService {
    store: Arc<dyn ObjectStore>,
    location: String,
}

impl ObjectStoreService {
    /// `location` は `get_storage_location` で返す値（通常はバケット名）
    pub fn new(store: Arc<dyn ObjectStore>, location: impl Into<String>) -> Self {
        Self {
            store,
            location: location.into(),
        }
    }

    fn path(key: &str) -> Result<Path> {
        Path::parse(key).map_err(|e| StorageError::Backend(e.into()))
    }
}

#[async_trait]
impl StorageService for ObjectStoreService {
    async fn put_object(&self, key: &str, data: Bytes) -> Result<()> {
        let path = Self::path(key)?;
        tracing::trace!(key, len = data.len(), "put_object");
        self.store
            .put(&path, data.into())
            .await
            .map_err(|e| StorageError::from_object_store(key, e))?;
        Ok(())
    }

    async fn get_object(&self, key: &str) -> Result<Bytes> {
        let path = Self::path(key)?;
        tracing::trace!(key, "get_object");
        let result = self
            .store
            .get(&path)
            .await
            .map_err(|e| StorageError::from_object_store(key, e))?;
        result
            .bytes()
            .await
            .map_err(|e| StorageError::from_object_store(key, e))
    }

    /// `prefix/<call_id>/.../<suffix>` の形のキーから call_id を取り出す
    ///
    /// 一覧の順序を保ったまま重複を除きます。
    async fn get_callset_status(&self, prefix: &str, suffix: &str) -> Result<Vec<String>> {
        let prefix_path = Self::path(prefix)?;
        let objects: Vec<_> = self
            .store
            .list(Some(&prefix_path))
            .try_collect()
            .await
            .map_err(|e| StorageError::from_object_store(prefix, e))?;

        let base = if prefix_path.as_ref().is_empty() {
            String::new()
        } else {
            format!("{}/", prefix_path.as_ref())
        };

        let mut call_ids: Vec<String> = Vec::new();
        for meta in &objects {
            let key = meta.location.as_ref();
            if !key.ends_with(suffix) {
                continue;
            }
            let Some(rest) = key.strip_prefix(&base) else {
                continue;
            };
            let Some((call_id, _)) = rest.split_once('/') else {
                continue;
            };
            if !call_ids.iter().any(|c| c == call_id) {
                call_ids.push(call_id.to_string());
            }
        }
        tracing::trace!(prefix, found = call_ids.len(), "get_callset_status");
        Ok(call_ids)
    }

    async fn get_call_status(&self, key: &str) -> Result<Option<CallStatus>> {
        match self.get_object(key).await {
            Ok(body) => Ok(Some(parse_ascii_json(key, &body)?)),
            Err(StorageError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_call_output(&self, key: &str) -> Result<Bytes> {
        self.get_object(key).await
    }

    fn get_storage_location(&self) -> String {
        self.location.clone()
    }
}
