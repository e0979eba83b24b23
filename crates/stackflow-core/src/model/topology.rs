//! トポロジーモデル
//!
//! ネットワーク・コントローラー・VM宣言。いずれもビルドごとに新規作成され、
//! 作成後は変更されない。

use super::cidr::Cidr;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// ネットワークコンテキスト（リソースグループ / VNet / サブネット）
///
/// 1回のスタックビルドで1つだけ作られ、全VM宣言から共有参照される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkContext {
    pub resource_group_name: String,
    pub resource_group_location: String,
    pub virtual_network_name: String,
    pub address_space: Cidr,
    pub subnet_name: String,
    pub subnet_prefix: Cidr,
}

impl NetworkContext {
    /// サブネット参照（{vnet}/{subnet}）
    pub fn subnet_reference(&self) -> String {
        format!("{}/{}", self.virtual_network_name, self.subnet_name)
    }
}

/// コントローラーID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerIdentity {
    /// 名前プールから割り当てられた名前
    pub name: String,

    /// 割り当て順（0始まり）
    pub index: usize,

    /// プライベートIPアドレス
    pub private_address: Ipv4Addr,
}

/// VM宣言
///
/// コンパイラの最終成果物。ネットワークコンテキストは借用で共有する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmDeclaration<'a> {
    pub vm_name: String,
    pub environment: String,
    pub stack_name: String,
    pub size: String,
    pub network: &'a NetworkContext,
    pub private_address: Ipv4Addr,
    pub ssh_public_keys: Vec<String>,
    pub image_reference: String,
}
