//! StorageService port - プロバイダごとの Backend Client
//!
//! Facade はこの trait 越しにだけストレージへアクセスします。
//!
//! # 実装
//! - `impls::ObjectStoreService`: object_store クレートの任意のストアを包む
//! - `impls::build_s3` / `impls::build_gcs`: その S3 / GCS 向けコンストラクタ

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::CallStatus;
use crate::error::Result;

/// StorageService は 1 つのバケットへの narrow なインターフェース
///
/// # 設計原則
/// - リトライ・キャッシュはしない（エラーはそのまま返す）
/// - "存在しない" は `get_call_status` でのみ `None` として扱う
#[async_trait]
pub trait StorageService: Send + Sync {
    async fn put_object(&self, key: &str, data: Bytes) -> Result<()>;

    async fn get_object(&self, key: &str) -> Result<Bytes>;

    /// `prefix` 配下で `suffix` で終わるキーを持つ call の ID 一覧
    async fn get_callset_status(&self, prefix: &str, suffix: &str) -> Result<Vec<String>>;

    /// status が無ければ `None`
    async fn get_call_status(&self, key: &str) -> Result<Option<CallStatus>>;

    async fn get_call_output(&self, key: &str) -> Result<Bytes>;

    /// バケット名などの保存先
    fn get_storage_location(&self) -> String;
}
