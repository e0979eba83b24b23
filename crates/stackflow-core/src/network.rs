//! ネットワークトポロジービルダー
//!
//! (env, stack) の組から、リソースグループ・VNet・サブネットの名前を導出する。
//! 同じ入力からは常に同じ宣言が得られる。

use crate::model::{AddressPlan, DEFAULT_LOCATION, NetworkContext};
use tracing::debug;

pub fn resource_group_name(env: &str, stack_name: &str) -> String {
    format!("{}-rg-{}", env, stack_name)
}

pub fn virtual_network_name(env: &str, stack_name: &str) -> String {
    format!("{}-vnet-{}", env, stack_name)
}

pub fn subnet_name(env: &str, stack_name: &str) -> String {
    format!("{}-subnet-{}", env, stack_name)
}

/// デフォルトのロケーションとアドレス計画でネットワークを構築
pub fn build_network(env: &str, stack_name: &str) -> NetworkContext {
    build_network_with(env, stack_name, DEFAULT_LOCATION, &AddressPlan::default())
}

/// ロケーションとアドレス計画を指定してネットワークを構築
pub fn build_network_with(
    env: &str,
    stack_name: &str,
    location: &str,
    plan: &AddressPlan,
) -> NetworkContext {
    let network = NetworkContext {
        resource_group_name: resource_group_name(env, stack_name),
        resource_group_location: location.to_string(),
        virtual_network_name: virtual_network_name(env, stack_name),
        address_space: plan.address_space,
        subnet_name: subnet_name(env, stack_name),
        subnet_prefix: plan.subnet,
    };
    debug!(
        resource_group = %network.resource_group_name,
        vnet = %network.virtual_network_name,
        subnet = %network.subnet_name,
        "Network topology derived"
    );
    network
}
