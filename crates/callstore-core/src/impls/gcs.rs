//! GcsService - Google Cloud Storage 向けの Backend Client

use object_store::gcp::GoogleCloudStorageBuilder;
use std::sync::Arc;

use super::ObjectStoreService;
use crate::domain::GcsConfig;
use crate::error::{Result, StorageError};

/// GCS のバケットに向いた ObjectStoreService を作る
///
/// `project` は object_store 側では使わない（バケット名だけで解決できる）ので、
/// ログにだけ残します。
pub fn build_gcs(config: &GcsConfig) -> Result<ObjectStoreService> {
    if config.bucket.is_empty() {
        return Err(StorageError::MissingConfig("google_storage.bucket"));
    }

    let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(&config.bucket);

    if let Some(path) = &config.service_account_path {
        builder = builder.with_service_account_path(path);
    }
    if let Some(key) = &config.service_account_key {
        builder = builder.with_service_account_key(key);
    }

    let store = builder.build().map_err(StorageError::Backend)?;
    tracing::debug!(bucket = %config.bucket, project = ?config.project, "built gcs client");
    Ok(ObjectStoreService::new(Arc::new(store), config.bucket.clone()))
}
