//! 外部コラボレーター
//!
//! 認証情報プロバイダーとメンバーディレクトリのトレイトと、
//! 環境変数・JSONファイル・固定値による実装。

use crate::error::{Result, StackError};
use crate::model::MemberRecord;
use stackflow_cloud::CredentialBundle;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const ENV_SUBSCRIPTION_ID: &str = "ARM_SUBSCRIPTION_ID";
pub const ENV_TENANT_ID: &str = "ARM_TENANT_ID";
pub const ENV_CLIENT_ID: &str = "ARM_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "ARM_CLIENT_SECRET";

/// 認証情報プロバイダー
pub trait CredentialProvider {
    fn credentials(&self) -> Result<CredentialBundle>;
}

/// メンバーディレクトリ
pub trait IdentityDirectory {
    fn members(&self) -> Result<Vec<MemberRecord>>;
}

/// `ARM_*` 環境変数からサービスプリンシパルを読み込む
#[derive(Debug, Clone, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    pub fn new() -> Self {
        Self
    }

    fn var(name: &str) -> Result<String> {
        std::env::var(name)
            .map_err(|_| StackError::Credential(format!("環境変数 {} が設定されていません", name)))
    }
}

impl CredentialProvider for EnvCredentialProvider {
    fn credentials(&self) -> Result<CredentialBundle> {
        let bundle = CredentialBundle::new(
            Self::var(ENV_SUBSCRIPTION_ID)?,
            Self::var(ENV_TENANT_ID)?,
            Self::var(ENV_CLIENT_ID)?,
            Self::var(ENV_CLIENT_SECRET)?,
        );
        debug!(subscription_id = %bundle.subscription_id, "Credentials loaded from environment");
        Ok(bundle)
    }
}

/// 固定の認証情報
#[derive(Debug, Clone)]
pub struct StaticCredentials(pub CredentialBundle);

impl CredentialProvider for StaticCredentials {
    fn credentials(&self) -> Result<CredentialBundle> {
        Ok(self.0.clone())
    }
}

/// メンバーシップのJSONエクスポートを読むディレクトリ
#[derive(Debug, Clone)]
pub struct JsonMemberDirectory {
    path: PathBuf,
}

impl JsonMemberDirectory {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IdentityDirectory for JsonMemberDirectory {
    fn members(&self) -> Result<Vec<MemberRecord>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| StackError::MemberFile {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        let members: Vec<MemberRecord> =
            serde_json::from_str(&content).map_err(|e| StackError::MemberFile {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        debug!(count = members.len(), path = %self.path.display(), "Members loaded");
        Ok(members)
    }
}

/// 固定のメンバー一覧
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory(pub Vec<MemberRecord>);

impl IdentityDirectory for StaticDirectory {
    fn members(&self) -> Result<Vec<MemberRecord>> {
        Ok(self.0.clone())
    }
}
