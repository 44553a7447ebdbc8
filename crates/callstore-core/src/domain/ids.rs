//! Domain identifiers (strongly-typed IDs).
//!
//! Callset と Call の ID はどちらもキーのパスセグメントになる文字列です。
//! Phantom type パターンで `Id<T>` の実装を共有しつつ、
//! `CallsetId` と `CallId` を取り違えないようにしています。
//!
//! ID に `/` を含めないのは呼び出し側の責任です（キー生成では正規化しない）。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
pub trait IdMarker: Send + Sync + 'static {
    /// Debug 表示で使う名前（例: "callset"）
    fn kind() -> &'static str;
}

/// ジェネリック ID 型
///
/// 中身は文字列そのもの。`T` は PhantomData で、コンパイル時の型安全性だけを提供します。
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T: IdMarker> {
    value: String,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T: IdMarker> From<&str> for Id<T> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<T: IdMarker> From<String> for Id<T> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<T: IdMarker> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T: IdMarker> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", T::kind(), self.value)
    }
}

// ========================================
// マーカー型の定義
// ========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Callset {}

impl IdMarker for Callset {
    fn kind() -> &'static str {
        "callset"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Call {}

impl IdMarker for Call {
    fn kind() -> &'static str {
        "call"
    }
}

/// Identifier of a Callset (a batch of related invocations).
pub type CallsetId = Id<Callset>;

/// Identifier of a Call (one invocation within a Callset).
pub type CallId = Id<Call>;

impl CallsetId {
    /// 新しい callset ID を生成（ULID なので生成順にソート可能）
    pub fn generate() -> Self {
        Self::new(Ulid::new().to_string().to_lowercase())
    }
}

impl CallId {
    /// callset 内の連番から call ID を作る（`00000`, `00001`, ...）
    pub fn from_index(index: usize) -> Self {
        Self::new(format!("{index:05}"))
    }
}
