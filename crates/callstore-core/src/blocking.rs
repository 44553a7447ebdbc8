//! BlockingStorage - 同期 API の Storage
//!
//! async ランタイムを持たない worker 向け。各呼び出しはバックエンドの
//! 応答が返るまで呼び出しスレッドをブロックします。
//!
//! 呼び出し元のランタイムには依存せず、専用の current-thread ランタイムを
//! 常に 1 つ持ちます。tokio ランタイム上から呼ばれた場合は、そのスレッドを
//! 塞がないよう別スレッドで専用ランタイムを回して待ちます。

use bytes::Bytes;
use std::future::Future;
use tokio::runtime::{Builder, Runtime};

use crate::domain::{
    CallId, CallKeys, CallStatus, CallsetId, ExecutorConfig, RuntimeMeta, StorageConfig,
    StorageInfo,
};
use crate::error::{Result, StorageError};
use crate::storage::Storage;

pub struct BlockingStorage {
    inner: Storage,
    /// Drop 時に取り出すため Option（常に Some）
    runtime: Option<Runtime>,
}

impl BlockingStorage {
    pub fn new(config: StorageConfig) -> Result<Self> {
        Self::from_storage(Storage::new(config)?)
    }

    pub fn from_storage(inner: Storage) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| StorageError::Runtime(format!("failed to create runtime: {e}")))?;
        Ok(Self {
            inner,
            runtime: Some(runtime),
        })
    }

    fn block_on<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>> + Send,
        T: Send,
    {
        let rt = self
            .runtime
            .as_ref()
            .ok_or_else(|| StorageError::Runtime("runtime already shut down".to_string()))?;
        if tokio::runtime::Handle::try_current().is_err() {
            return rt.block_on(fut);
        }
        // ランタイムのスレッド上では block_on できないので別スレッドで待つ
        std::thread::scope(|s| {
            s.spawn(|| rt.block_on(fut))
                .join()
                .map_err(|_| StorageError::Runtime("thread panicked".into()))?
        })
    }

    pub fn get_storage_config(&self) -> &StorageConfig {
        self.inner.get_storage_config()
    }

    pub fn get_storage_info(&self) -> StorageInfo {
        self.inner.get_storage_info()
    }

    pub fn put_object(&self, key: &str, data: impl Into<Bytes>) -> Result<()> {
        let data = data.into();
        self.block_on(self.inner.put_object(key, data))
    }

    pub fn get_object(&self, key: &str) -> Result<Bytes> {
        self.block_on(self.inner.get_object(key))
    }

    pub fn create_keys(&self, callset_id: &CallsetId, call_id: &CallId) -> CallKeys {
        self.inner.create_keys(callset_id, call_id)
    }

    pub fn create_func_key(&self, callset_id: &CallsetId) -> String {
        self.inner.create_func_key(callset_id)
    }

    pub fn create_agg_data_key(&self, callset_id: &CallsetId) -> String {
        self.inner.create_agg_data_key(callset_id)
    }

    pub fn get_callset_status(&self, callset_id: &CallsetId) -> Result<Vec<CallId>> {
        self.block_on(self.inner.get_callset_status(callset_id))
    }

    pub fn get_call_status(
        &self,
        callset_id: &CallsetId,
        call_id: &CallId,
    ) -> Result<Option<CallStatus>> {
        self.block_on(self.inner.get_call_status(callset_id, call_id))
    }

    pub fn get_call_output(&self, callset_id: &CallsetId, call_id: &CallId) -> Result<Bytes> {
        self.block_on(self.inner.get_call_output(callset_id, call_id))
    }

    pub fn get_runtime_info(&self, config: &ExecutorConfig) -> Result<RuntimeMeta> {
        self.block_on(self.inner.get_runtime_info(config))
    }
}

impl Drop for BlockingStorage {
    fn drop(&mut self) {
        // async コンテキスト内で Runtime を drop すると panic するため
        if let Some(rt) = self.runtime.take() {
            rt.shutdown_background();
        }
    }
}
