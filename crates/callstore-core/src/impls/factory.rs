//! CloudServiceFactory - 本番用の ServiceFactory

use std::sync::Arc;

use super::{build_gcs, build_s3};
use crate::domain::{GcsConfig, S3Config};
use crate::error::Result;
use crate::ports::{ServiceFactory, StorageService};

/// object_store の S3 / GCS クライアントを作る
#[derive(Debug, Clone, Copy, Default)]
pub struct CloudServiceFactory;

impl ServiceFactory for CloudServiceFactory {
    fn s3(&self, config: &S3Config) -> Result<Arc<dyn StorageService>> {
        Ok(Arc::new(build_s3(config)?))
    }

    fn gcs(&self, config: &GcsConfig) -> Result<Arc<dyn StorageService>> {
        Ok(Arc::new(build_gcs(config)?))
    }
}
