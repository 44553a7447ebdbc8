//! Ports - 抽象化レイヤー
//!
//! 外部のオブジェクトストレージ（S3, GCS）へのインターフェースを定義し、
//! プロバイダ SDK の詳細を facade から隠蔽します。

pub mod service_factory;
pub mod storage_service;

pub use self::service_factory::ServiceFactory;
pub use self::storage_service::StorageService;
