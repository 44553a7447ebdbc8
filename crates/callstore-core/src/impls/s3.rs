//! S3Service - S3 互換ストレージ向けの Backend Client
//!
//! 環境変数（`AWS_*`）を先に読み、設定ファイルの値で上書きします。

use object_store::aws::AmazonS3Builder;
use std::sync::Arc;

use super::ObjectStoreService;
use crate::domain::S3Config;
use crate::error::{Result, StorageError};

pub const DEFAULT_REGION: &str = "us-east-1";

/// S3 のバケットに向いた ObjectStoreService を作る
pub fn build_s3(config: &S3Config) -> Result<ObjectStoreService> {
    if config.bucket.is_empty() {
        return Err(StorageError::MissingConfig("s3.bucket"));
    }

    let mut builder = AmazonS3Builder::from_env().with_bucket_name(&config.bucket);

    if let Some(region) = &config.region {
        builder = builder.with_region(region);
    } else if std::env::var_os("AWS_REGION").is_none()
        && std::env::var_os("AWS_DEFAULT_REGION").is_none()
    {
        builder = builder.with_region(DEFAULT_REGION);
    }

    // MinIO などはパススタイルでアクセスする
    if let Some(endpoint) = &config.endpoint {
        builder = builder
            .with_endpoint(endpoint)
            .with_virtual_hosted_style_request(false);
    }
    if config.allow_http {
        builder = builder.with_allow_http(true);
    }

    if let Some(ak) = &config.access_key_id {
        builder = builder.with_access_key_id(ak);
    }
    if let Some(sk) = &config.secret_access_key {
        builder = builder.with_secret_access_key(sk);
    }
    if let Some(token) = &config.session_token {
        builder = builder.with_token(token);
    }

    let store = builder.build().map_err(StorageError::Backend)?;
    tracing::debug!(bucket = %config.bucket, endpoint = ?config.endpoint, "built s3 client");
    Ok(ObjectStoreService::new(Arc::new(store), config.bucket.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::StorageService;

    #[test]
    fn test_build_s3_with_endpoint() {
        let config = S3Config {
            bucket: "jobs-bucket".to_string(),
            region: Some("eu-west-1".to_string()),
            endpoint: Some("http://127.0.0.1:9000".to_string()),
            access_key_id: Some("minio".to_string()),
            secret_access_key: Some("minio123".to_string()),
            session_token: None,
            allow_http: true,
        };
        let service = build_s3(&config).unwrap();
        assert_eq!(service.get_storage_location(), "jobs-bucket");
    }

    #[test]
    fn test_build_s3_requires_bucket() {
        let err = build_s3(&S3Config::default()).err().unwrap();
        assert!(matches!(err, StorageError::MissingConfig("s3.bucket")));
    }
}
