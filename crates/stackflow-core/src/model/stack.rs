//! スタック設定モデル
//!
//! stack.kdl から読み込まれる、1環境分のリーダークラスタ定義

use super::cidr::Cidr;
use crate::error::{Result, StackError};
use crate::network::{resource_group_name, subnet_name, virtual_network_name};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::path::PathBuf;

/// イメージ参照テンプレート内のサブスクリプションIDプレースホルダー
pub const SUBSCRIPTION_PLACEHOLDER: &str = "{subscription_id}";

pub const DEFAULT_LOCATION: &str = "eastus";
pub const DEFAULT_VM_SIZE: &str = "Standard_D2s_v4";
pub const DEFAULT_CONTROLLERS: usize = 3;
pub const DEFAULT_ADDRESS_SPACE: &str = "10.0.0.0/16";
pub const DEFAULT_SUBNET: &str = "10.0.0.0/24";
pub const DEFAULT_BASE_OFFSET: u32 = 10;
pub const DEFAULT_IMAGE_TEMPLATE: &str = "/subscriptions/{subscription_id}/resourceGroups/ops-rg-machine-images/providers/Microsoft.Compute/images/NOMAD-CONSUL-eastus-220718-1345";

/// SSH公開鍵の集約方法
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMergePolicy {
    /// 値で重複排除（最初の出現順を維持）
    #[default]
    Deduplicate,
    /// 単純連結（重複をそのまま残す）
    Concatenate,
}

impl std::str::FromStr for KeyMergePolicy {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dedup" | "deduplicate" => Ok(Self::Deduplicate),
            "concat" | "concatenate" => Ok(Self::Concatenate),
            other => Err(StackError::InvalidConfig(format!(
                "unknown ssh-keys policy '{}' (expected dedup or concat)",
                other
            ))),
        }
    }
}

/// アドレス割り当て計画
///
/// サブネットの大きさがコントローラー数の上限を決め、
/// ベースオフセットが他ロール用アドレスとの衝突を避ける。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressPlan {
    /// 仮想ネットワークのアドレス空間
    pub address_space: Cidr,

    /// コントローラーを配置するサブネット
    pub subnet: Cidr,

    /// サブネット先頭からのオフセット（i番目は base_offset + i）
    pub base_offset: u32,
}

impl Default for AddressPlan {
    fn default() -> Self {
        Self {
            address_space: Cidr::new_unchecked(Ipv4Addr::new(10, 0, 0, 0), 16),
            subnet: Cidr::new_unchecked(Ipv4Addr::new(10, 0, 0, 0), 24),
            base_offset: DEFAULT_BASE_OFFSET,
        }
    }
}

impl AddressPlan {
    pub fn validate(&self) -> Result<()> {
        if !self.address_space.contains_block(&self.subnet) {
            return Err(StackError::InvalidConfig(format!(
                "subnet {} is outside address space {}",
                self.subnet, self.address_space
            )));
        }
        if self.base_offset == 0 {
            return Err(StackError::InvalidConfig(
                "base-offset must be at least 1 (offset 0 is the network address)".to_string(),
            ));
        }
        Ok(())
    }
}

/// スタック設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackConfig {
    /// 環境名（stg, prod など。命名にのみ使用）
    pub env: String,

    /// スタック名（leader など。命名にのみ使用）
    pub name: String,

    /// リソースグループのロケーション
    pub location: String,

    /// コントローラー台数
    pub controllers: usize,

    /// VMサイズ
    pub vm_size: String,

    /// コントローラー名プール（順序付き）
    pub name_pool: Vec<String>,

    /// アドレス割り当て計画
    pub address_plan: AddressPlan,

    /// イメージ参照テンプレート（{subscription_id} を含む）
    pub image_template: String,

    /// メンバーファイル（JSON）のパス
    pub members_path: Option<PathBuf>,

    /// SSH公開鍵の集約方法
    pub key_policy: KeyMergePolicy,
}

impl StackConfig {
    /// デフォルト値でスタック設定を作成
    pub fn new(env: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            env: env.into(),
            name: name.into(),
            location: DEFAULT_LOCATION.to_string(),
            controllers: DEFAULT_CONTROLLERS,
            vm_size: DEFAULT_VM_SIZE.to_string(),
            name_pool: Vec::new(),
            address_plan: AddressPlan::default(),
            image_template: DEFAULT_IMAGE_TEMPLATE.to_string(),
            members_path: None,
            key_policy: KeyMergePolicy::default(),
        }
    }

    /// 出力ファイル名などに使う識別子（{env}-{name}）
    pub fn slug(&self) -> String {
        format!("{}-{}", self.env, self.name)
    }

    /// ビルド前の設定検証
    pub fn validate(&self) -> Result<()> {
        if self.env.trim().is_empty() {
            return Err(StackError::InvalidConfig("env is required".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(StackError::InvalidConfig(
                "stack name is required".to_string(),
            ));
        }

        // VM名はネットワークリソースと同じ論理ID空間に並ぶ
        let reserved = [
            resource_group_name(&self.env, &self.name),
            virtual_network_name(&self.env, &self.name),
            subnet_name(&self.env, &self.name),
        ];

        let mut seen = HashSet::new();
        for name in &self.name_pool {
            if name.trim().is_empty() {
                return Err(StackError::InvalidConfig(
                    "name pool contains an empty name".to_string(),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(StackError::DuplicateName(name.clone()));
            }
            if reserved.contains(name) {
                return Err(StackError::ReservedName(name.clone()));
            }
        }

        if self.controllers > self.name_pool.len() {
            return Err(StackError::NamePoolExhausted {
                requested: self.controllers,
                available: self.name_pool.len(),
            });
        }

        if !self.image_template.contains(SUBSCRIPTION_PLACEHOLDER) {
            return Err(StackError::InvalidConfig(format!(
                "image template must contain {}",
                SUBSCRIPTION_PLACEHOLDER
            )));
        }

        self.address_plan.validate()
    }
}
