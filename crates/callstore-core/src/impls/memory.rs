//! InMemoryServiceFactory - 開発用・テスト用の ServiceFactory
//!
//! バケット名ごとに `object_store::memory::InMemory` を 1 つ持ちます。
//! 同じバケットを指す設定からは同じストアが返るので、
//! facade 経由で書いたものを別のクライアントから読めます。

use object_store::ObjectStore;
use object_store::memory::InMemory;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::ObjectStoreService;
use crate::domain::{BackendKind, GcsConfig, S3Config};
use crate::error::{Result, StorageError};
use crate::ports::{ServiceFactory, StorageService};

#[derive(Default)]
pub struct InMemoryServiceFactory {
    buckets: Mutex<HashMap<(BackendKind, String), Arc<InMemory>>>,
    /// 作られたクライアントの履歴（構築されたかどうかの確認用）
    built: Mutex<Vec<(BackendKind, String)>>,
    gcs_configs: Mutex<Vec<GcsConfig>>,
}

impl InMemoryServiceFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// バケットのストアを取得（なければ作成）
    pub fn bucket(&self, kind: BackendKind, bucket: &str) -> Arc<InMemory> {
        let mut buckets = self.buckets.lock().unwrap_or_else(|e| e.into_inner());
        buckets
            .entry((kind, bucket.to_string()))
            .or_insert_with(|| Arc::new(InMemory::new()))
            .clone()
    }

    pub fn built(&self) -> Vec<(BackendKind, String)> {
        self.built.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// `gcs()` に渡された設定（project の確認用）
    pub fn gcs_configs(&self) -> Vec<GcsConfig> {
        self.gcs_configs.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn service(&self, kind: BackendKind, bucket: &str) -> Arc<dyn StorageService> {
        self.built
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((kind, bucket.to_string()));
        let store: Arc<dyn ObjectStore> = self.bucket(kind, bucket);
        Arc::new(ObjectStoreService::new(store, bucket))
    }
}

impl ServiceFactory for InMemoryServiceFactory {
    fn s3(&self, config: &S3Config) -> Result<Arc<dyn StorageService>> {
        if config.bucket.is_empty() {
            return Err(StorageError::MissingConfig("s3.bucket"));
        }
        Ok(self.service(BackendKind::S3, &config.bucket))
    }

    fn gcs(&self, config: &GcsConfig) -> Result<Arc<dyn StorageService>> {
        if config.bucket.is_empty() {
            return Err(StorageError::MissingConfig("google_storage.bucket"));
        }
        self.gcs_configs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(config.clone());
        Ok(self.service(BackendKind::Google, &config.bucket))
    }
}
