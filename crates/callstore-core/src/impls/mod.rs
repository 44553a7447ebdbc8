//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **ObjectStoreService**: object_store のストアを包む共通の Backend Client
//! - **build_s3 / build_gcs**: S3 / GCS クライアントの組み立て
//! - **CloudServiceFactory**: 本番用の ServiceFactory
//! - **InMemoryServiceFactory**: 開発用・テスト用の ServiceFactory

pub mod factory;
pub mod gcs;
pub mod memory;
pub mod object_store_service;
pub mod s3;

pub use self::factory::CloudServiceFactory;
pub use self::gcs::build_gcs;
pub use self::memory::InMemoryServiceFactory;
pub use self::object_store_service::ObjectStoreService;
pub use self::s3::build_s3;
