//! ServiceFactory port - サブ設定から Backend Client を作る
//!
//! Facade の構築と `get_runtime_info` の両方がこれを使います。
//! テストではインメモリのストアを返す実装に差し替えます。

use std::sync::Arc;

use super::StorageService;
use crate::domain::{GcsConfig, S3Config};
use crate::error::Result;

pub trait ServiceFactory: Send + Sync {
    fn s3(&self, config: &S3Config) -> Result<Arc<dyn StorageService>>;

    fn gcs(&self, config: &GcsConfig) -> Result<Arc<dyn StorageService>>;
}
