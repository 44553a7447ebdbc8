//! callstore-core
//!
//! Storage facade for distributed function invocations (callsets).
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, keys, config, status）
//! - **ports**: 抽象化レイヤー（StorageService, ServiceFactory）
//! - **impls**: 実装（object_store ベースの S3 / GCS クライアント、インメモリ）
//! - **storage**: Storage facade（async）
//! - **blocking**: BlockingStorage（同期 API）
//! - **error**: StorageError

pub mod blocking;
pub mod domain;
pub mod error;
pub mod impls;
pub mod ports;
pub mod storage;

pub use blocking::BlockingStorage;
pub use error::{Result, StorageError};
pub use storage::Storage;
