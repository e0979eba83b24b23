//! リソースグラフの組み立て
//!
//! ネットワーク構築・割り当て・コンパイルを合成し、プロビジョニング
//! バックエンドへ渡す [`ResourceGraph`] を返す。宣言の順序は
//! リソースグループ → VNet → サブネット → VM。

use crate::allocator::allocate;
use crate::compiler::compile;
use crate::error::Result;
use crate::model::{MemberRecord, NetworkContext, StackConfig, VmDeclaration};
use crate::network::build_network_with;
use crate::source::{CredentialProvider, IdentityDirectory};
use serde_json::json;
use stackflow_cloud::{CredentialBundle, ProviderBlock, ResourceDeclaration, ResourceGraph};
use tracing::{info, instrument};

pub const PROVIDER_NAME: &str = "azurerm";
pub const RESOURCE_GROUP: &str = "azurerm_resource_group";
pub const VIRTUAL_NETWORK: &str = "azurerm_virtual_network";
pub const SUBNET: &str = "azurerm_subnet";
pub const VIRTUAL_MACHINE: &str = "azurerm_linux_virtual_machine";

/// ビルド結果
///
/// バックエンドへの受け渡しには認証情報も必要になるため、グラフと一緒に保持する。
#[derive(Debug, Clone)]
pub struct StackBuild {
    pub graph: ResourceGraph,
    pub credentials: CredentialBundle,
}

/// コラボレーターから入力を取得してスタックをビルド
///
/// 設定エラーはコラボレーターを呼ぶ前に検出する。
/// 認証情報・メンバーの取得エラーはそのまま呼び出し元へ伝播する。
#[instrument(skip_all, fields(env = %config.env, stack = %config.name))]
pub fn build_stack(
    config: &StackConfig,
    credentials: &dyn CredentialProvider,
    directory: &dyn IdentityDirectory,
) -> Result<StackBuild> {
    config.validate()?;
    let credentials = credentials.credentials()?;
    let members = directory.members()?;
    let graph = build_graph(config, &credentials, &members)?;
    Ok(StackBuild { graph, credentials })
}

/// 解決済みの入力からリソースグラフを生成（純粋関数）
pub fn build_graph(
    config: &StackConfig,
    credentials: &CredentialBundle,
    members: &[MemberRecord],
) -> Result<ResourceGraph> {
    config.validate()?;

    let network = build_network_with(
        &config.env,
        &config.name,
        &config.location,
        &config.address_plan,
    );
    let identities = allocate(config.controllers, &config.name_pool, &config.address_plan)?;
    let vms = compile(config, credentials, members, &network, &identities)?;

    let mut graph = ResourceGraph::new().with_provider(provider_block(credentials));
    for declaration in network_declarations(config, &network) {
        graph.add(declaration)?;
    }
    for vm in &vms {
        graph.add(vm_declaration(vm))?;
    }

    info!(
        resources = graph.len(),
        controllers = vms.len(),
        "Resource graph built"
    );
    Ok(graph)
}

fn tags(config: &StackConfig) -> serde_json::Value {
    json!({
        "environment": config.env,
        "stack": config.name,
    })
}

/// プロバイダーブロック（シークレットは含めない）
pub fn provider_block(credentials: &CredentialBundle) -> ProviderBlock {
    ProviderBlock::new(
        PROVIDER_NAME,
        json!({
            "features": {},
            "subscription_id": credentials.subscription_id,
            "tenant_id": credentials.tenant_id,
            "client_id": credentials.client_id,
        }),
    )
}

/// リソースグループ・VNet・サブネットの宣言
pub fn network_declarations(
    config: &StackConfig,
    network: &NetworkContext,
) -> Vec<ResourceDeclaration> {
    vec![
        ResourceDeclaration::new(
            RESOURCE_GROUP,
            &network.resource_group_name,
            json!({
                "name": network.resource_group_name,
                "location": network.resource_group_location,
                "tags": tags(config),
            }),
        ),
        ResourceDeclaration::new(
            VIRTUAL_NETWORK,
            &network.virtual_network_name,
            json!({
                "name": network.virtual_network_name,
                "resource_group_name": network.resource_group_name,
                "location": network.resource_group_location,
                "address_space": [network.address_space.to_string()],
                "tags": tags(config),
            }),
        ),
        ResourceDeclaration::new(
            SUBNET,
            &network.subnet_name,
            json!({
                "name": network.subnet_name,
                "resource_group_name": network.resource_group_name,
                "virtual_network_name": network.virtual_network_name,
                "address_prefixes": [network.subnet_prefix.to_string()],
            }),
        ),
    ]
}

/// VM宣言をリソース宣言に変換
pub fn vm_declaration(vm: &VmDeclaration<'_>) -> ResourceDeclaration {
    ResourceDeclaration::new(
        VIRTUAL_MACHINE,
        &vm.vm_name,
        json!({
            "name": vm.vm_name,
            "resource_group_name": vm.network.resource_group_name,
            "location": vm.network.resource_group_location,
            "size": vm.size,
            "subnet": vm.network.subnet_reference(),
            "private_ip_address": vm.private_address.to_string(),
            "ssh_public_keys": vm.ssh_public_keys,
            "source_image_id": vm.image_reference,
            "tags": {
                "environment": vm.environment,
                "stack": vm.stack_name,
            },
        }),
    )
}
