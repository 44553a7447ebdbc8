//! Key layout - callset / call ごとのオブジェクトキー
//!
//! ```text
//! <prefix>/<callset_id>/<call_id>/data.pickle
//! <prefix>/<callset_id>/<call_id>/output.pickle
//! <prefix>/<callset_id>/<call_id>/status.json
//! <prefix>/<callset_id>/func.json
//! <prefix>/<callset_id>/aggdata.pickle
//! ```
//!
//! キーは内容アドレスではなく、ただの階層パス文字列です。

use serde::{Deserialize, Serialize};

use super::ids::{CallId, CallsetId};

pub const DATA_SUFFIX: &str = "data.pickle";
pub const OUTPUT_SUFFIX: &str = "output.pickle";
pub const STATUS_SUFFIX: &str = "status.json";
pub const FUNC_SUFFIX: &str = "func.json";
pub const AGG_DATA_SUFFIX: &str = "aggdata.pickle";

/// 1 call に紐づく 3 つのキー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallKeys {
    pub data_key: String,
    pub output_key: String,
    pub status_key: String,
}

/// prefix を起点にキーを組み立てる
///
/// 同じ `(prefix, callset_id, call_id, 用途)` からは常に同じキーが得られます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLayout {
    prefix: String,
}

impl KeyLayout {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn create_keys(&self, callset_id: &CallsetId, call_id: &CallId) -> CallKeys {
        let call_prefix = join_key(&[&self.prefix, callset_id.as_str(), call_id.as_str()]);
        CallKeys {
            data_key: join_key(&[&call_prefix, DATA_SUFFIX]),
            output_key: join_key(&[&call_prefix, OUTPUT_SUFFIX]),
            status_key: join_key(&[&call_prefix, STATUS_SUFFIX]),
        }
    }

    pub fn create_func_key(&self, callset_id: &CallsetId) -> String {
        join_key(&[&self.prefix, callset_id.as_str(), FUNC_SUFFIX])
    }

    pub fn create_agg_data_key(&self, callset_id: &CallsetId) -> String {
        join_key(&[&self.prefix, callset_id.as_str(), AGG_DATA_SUFFIX])
    }

    /// `<prefix>/<callset_id>`（status 一覧の起点）
    pub fn callset_prefix(&self, callset_id: &CallsetId) -> String {
        join_key(&[&self.prefix, callset_id.as_str()])
    }
}

/// パスセグメントを `/` で連結する
///
/// - 左側が空、または既に `/` で終わっていれば区切りを足さない
/// - セグメント内の `/` は正規化しない
pub fn join_key(segments: &[&str]) -> String {
    let mut key = String::new();
    for segment in segments {
        if !key.is_empty() && !key.ends_with('/') {
            key.push('/');
        }
        key.push_str(segment);
    }
    key
}

/// ランタイムイメージのキーからメタデータのキーを得る（`.tar.gz` → `.meta.json`）
pub fn runtime_meta_key(runtime_key: &str) -> String {
    runtime_key.replace(".tar.gz", ".meta.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn create_keys_matches_layout() {
        let layout = KeyLayout::new("jobs");
        let keys = layout.create_keys(&"cs1".into(), &"c1".into());
        assert_eq!(keys.data_key, "jobs/cs1/c1/data.pickle");
        assert_eq!(keys.output_key, "jobs/cs1/c1/output.pickle");
        assert_eq!(keys.status_key, "jobs/cs1/c1/status.json");
    }

    #[rstest]
    #[case("jobs", "cs1", "c1")]
    #[case("pywren.jobs", "01hq3z7x", "00007")]
    #[case("a/b", "cs", "00000")]
    fn call_keys_share_prefix_and_are_distinct(
        #[case] prefix: &str,
        #[case] callset: &str,
        #[case] call: &str,
    ) {
        let layout = KeyLayout::new(prefix);
        let keys = layout.create_keys(&callset.into(), &call.into());
        let shared = format!("{prefix}/{callset}/{call}/");

        for key in [&keys.data_key, &keys.output_key, &keys.status_key] {
            assert!(key.starts_with(&shared), "{key} should start with {shared}");
        }
        assert_ne!(keys.data_key, keys.output_key);
        assert_ne!(keys.output_key, keys.status_key);
        assert_ne!(keys.data_key, keys.status_key);
    }

    #[test]
    fn callset_keys_differ_from_call_keys() {
        let layout = KeyLayout::new("jobs");
        let callset: CallsetId = "cs1".into();
        let func = layout.create_func_key(&callset);
        let agg = layout.create_agg_data_key(&callset);

        assert_eq!(func, "jobs/cs1/func.json");
        assert_eq!(agg, "jobs/cs1/aggdata.pickle");

        let keys = layout.create_keys(&callset, &"c1".into());
        for key in [&keys.data_key, &keys.output_key, &keys.status_key] {
            assert_ne!(key, &func);
            assert_ne!(key, &agg);
        }
    }

    #[test]
    fn keys_are_deterministic() {
        let a = KeyLayout::new("jobs").create_keys(&"cs".into(), &"c".into());
        let b = KeyLayout::new("jobs").create_keys(&"cs".into(), &"c".into());
        assert_eq!(a, b);
    }

    #[rstest]
    #[case(&["jobs", "cs1"], "jobs/cs1")]
    #[case(&["jobs/", "cs1"], "jobs/cs1")]
    #[case(&["", "cs1", "func.json"], "cs1/func.json")]
    #[case(&["jobs", "a/b"], "jobs/a/b")]
    fn join_key_cases(#[case] segments: &[&str], #[case] expected: &str) {
        assert_eq!(join_key(segments), expected);
    }

    #[rstest]
    #[case("img/v1.tar.gz", "img/v1.meta.json")]
    #[case("runtime.tar.gz", "runtime.meta.json")]
    #[case("plain.zip", "plain.zip")]
    fn runtime_meta_key_cases(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(runtime_meta_key(key), expected);
    }
}
