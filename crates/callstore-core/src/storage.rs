//! Storage - executor や worker が使うストレージの facade
//!
//! 構築時に設定から Backend Client を 1 つだけ選び、以後はそれに委譲します。
//! キーの組み立て以外のロジックは持ちません（リトライ・キャッシュなし）。
//!
//! # 使用例
//! ```ignore
//! let storage = Storage::new(StorageConfig::s3("jobs", S3Config::for_bucket("b")))?;
//! let keys = storage.create_keys(&callset_id, &call_id);
//! storage.put_object(&keys.data_key, data).await?;
//! let status = storage.get_call_status(&callset_id, &call_id).await?;
//! ```

use bytes::Bytes;
use std::sync::Arc;

use crate::domain::keys::{STATUS_SUFFIX, runtime_meta_key};
use crate::domain::status::parse_ascii_json;
use crate::domain::{
    BackendKind, CallId, CallKeys, CallStatus, CallsetId, ExecutorConfig, GcsConfig, KeyLayout,
    RuntimeMeta, S3Config, StorageConfig, StorageInfo,
};
use crate::error::{Result, StorageError};
use crate::impls::CloudServiceFactory;
use crate::ports::{ServiceFactory, StorageService};

pub struct Storage {
    config: StorageConfig,
    layout: KeyLayout,
    service: BackendKind,
    handler: Arc<dyn StorageService>,
    factory: Arc<dyn ServiceFactory>,
}

impl Storage {
    /// 設定から本番用クライアント（object_store）を選んで構築
    pub fn new(config: StorageConfig) -> Result<Self> {
        Self::with_factory(config, Arc::new(CloudServiceFactory))
    }

    /// ServiceFactory を差し替えて構築
    ///
    /// # 検証
    /// - `storage_backend` が未対応なら、クライアントを作る前に `UnsupportedBackend`
    /// - 選ばれたバックエンドのサブ設定が無ければ `MissingConfig`
    pub fn with_factory(config: StorageConfig, factory: Arc<dyn ServiceFactory>) -> Result<Self> {
        let service = config.backend_kind()?;
        let handler = match service {
            BackendKind::S3 => {
                let s3 = config.s3.as_ref().ok_or(StorageError::MissingConfig("s3"))?;
                factory.s3(s3)?
            }
            BackendKind::Google => {
                let gcs = config
                    .google_storage
                    .as_ref()
                    .ok_or(StorageError::MissingConfig("google_storage"))?;
                factory.gcs(gcs)?
            }
        };
        tracing::debug!(
            service = %service,
            prefix = %config.storage_prefix,
            location = %handler.get_storage_location(),
            "storage initialized"
        );

        Ok(Self {
            layout: KeyLayout::new(config.storage_prefix.clone()),
            config,
            service,
            handler,
            factory,
        })
    }

    pub fn get_storage_config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn get_storage_info(&self) -> StorageInfo {
        StorageInfo {
            service: self.service,
            location: self.handler.get_storage_location(),
        }
    }

    pub fn prefix(&self) -> &str {
        self.layout.prefix()
    }

    pub async fn put_object(&self, key: &str, data: impl Into<Bytes>) -> Result<()> {
        self.handler.put_object(key, data.into()).await
    }

    pub async fn get_object(&self, key: &str) -> Result<Bytes> {
        self.handler.get_object(key).await
    }

    pub fn create_keys(&self, callset_id: &CallsetId, call_id: &CallId) -> CallKeys {
        self.layout.create_keys(callset_id, call_id)
    }

    pub fn create_func_key(&self, callset_id: &CallsetId) -> String {
        self.layout.create_func_key(callset_id)
    }

    pub fn create_agg_data_key(&self, callset_id: &CallsetId) -> String {
        self.layout.create_agg_data_key(callset_id)
    }

    /// status が書かれている call の ID 一覧
    pub async fn get_callset_status(&self, callset_id: &CallsetId) -> Result<Vec<CallId>> {
        let callset_prefix = self.layout.callset_prefix(callset_id);
        let call_ids = self
            .handler
            .get_callset_status(&callset_prefix, STATUS_SUFFIX)
            .await?;
        Ok(call_ids.into_iter().map(CallId::from).collect())
    }

    /// status が無ければ `None`（エラーではない）
    pub async fn get_call_status(
        &self,
        callset_id: &CallsetId,
        call_id: &CallId,
    ) -> Result<Option<CallStatus>> {
        let keys = self.create_keys(callset_id, call_id);
        self.handler.get_call_status(&keys.status_key).await
    }

    pub async fn get_call_output(&self, callset_id: &CallsetId, call_id: &CallId) -> Result<Bytes> {
        let keys = self.create_keys(callset_id, call_id);
        self.handler.get_call_output(&keys.output_key).await
    }

    /// ランタイムイメージのメタデータを取得
    ///
    /// `runtime.runtime_storage` から専用のクライアントをその場で作ります。
    /// facade 自身のクライアントとは独立で、同じバケットとは限りません。
    pub async fn get_runtime_info(&self, config: &ExecutorConfig) -> Result<RuntimeMeta> {
        let runtime = &config.runtime;
        let (handler, key) = match runtime.runtime_storage.parse::<BackendKind>()? {
            BackendKind::S3 => {
                let bucket = runtime
                    .s3_bucket
                    .as_deref()
                    .ok_or(StorageError::MissingConfig("runtime.s3_bucket"))?;
                let key = runtime
                    .s3_key
                    .as_deref()
                    .ok_or(StorageError::MissingConfig("runtime.s3_key"))?;
                (self.factory.s3(&S3Config::for_bucket(bucket))?, key)
            }
            BackendKind::Google => {
                let bucket = runtime
                    .google_bucket
                    .as_deref()
                    .ok_or(StorageError::MissingConfig("runtime.google_bucket"))?;
                let key = runtime
                    .google_key
                    .as_deref()
                    .ok_or(StorageError::MissingConfig("runtime.google_key"))?;
                let gcs = GcsConfig {
                    bucket: bucket.to_string(),
                    project: config.google_account.as_ref().and_then(|a| a.project.clone()),
                    ..Default::default()
                };
                (self.factory.gcs(&gcs)?, key)
            }
        };

        let meta_key = runtime_meta_key(key);
        tracing::debug!(
            storage = %runtime.runtime_storage,
            location = %handler.get_storage_location(),
            key = %meta_key,
            "fetching runtime metadata"
        );
        let body = handler.get_object(&meta_key).await?;
        parse_ascii_json(&meta_key, &body)
    }
}
