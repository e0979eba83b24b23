//! メンバーモデル
//!
//! SSHアクセスを許可するメンバー（メンバーシップディレクトリのエクスポート）

use serde::{Deserialize, Serialize};

/// メンバーレコード
///
/// `publicKeys` は省略・空配列のどちらも許容し、鍵ゼロとして扱う。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_keys: Option<Vec<String>>,
}

impl MemberRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            public_keys: None,
        }
    }

    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.public_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// 登録済みの公開鍵（未設定なら空）
    pub fn keys(&self) -> &[String] {
        self.public_keys.as_deref().unwrap_or(&[])
    }
}
