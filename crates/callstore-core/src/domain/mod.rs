//! Domain model (IDs, key layout, configs, status records).

pub mod config;
pub mod ids;
pub mod keys;
pub mod status;

pub use config::{
    BackendKind, ExecutorConfig, GcsConfig, GoogleAccount, RuntimeConfig, S3Config, StorageConfig,
};
pub use ids::{CallId, CallsetId};
pub use keys::{CallKeys, KeyLayout};
pub use status::{CallStatus, RuntimeMeta, StorageInfo};
