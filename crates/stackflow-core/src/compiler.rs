//! クラスタ宣言コンパイラ
//!
//! 割り当て済みコントローラーごとに、共有ネットワーク・集約済みSSH鍵・
//! サブスクリプションIDを埋め込んだイメージ参照を持つVM宣言を生成する。
//! I/O は行わない。

use crate::error::{Result, StackError};
use crate::model::{
    ControllerIdentity, KeyMergePolicy, MemberRecord, NetworkContext, SUBSCRIPTION_PLACEHOLDER,
    StackConfig, VmDeclaration,
};
use stackflow_cloud::CredentialBundle;
use std::collections::HashSet;
use tracing::{debug, warn};

/// 全メンバーの公開鍵を集約
///
/// 鍵を持たないメンバーは何も寄与しない。`Deduplicate` では最初に
/// 現れた順序を保ったまま同一値を1つにまとめる。
pub fn aggregate_ssh_keys(members: &[MemberRecord], policy: KeyMergePolicy) -> Vec<String> {
    let all = members.iter().flat_map(|m| m.keys().iter().cloned());

    match policy {
        KeyMergePolicy::Concatenate => all.collect(),
        KeyMergePolicy::Deduplicate => {
            let mut seen = HashSet::new();
            let mut keys = Vec::new();
            let mut dropped = 0usize;
            for key in all {
                if seen.insert(key.clone()) {
                    keys.push(key);
                } else {
                    dropped += 1;
                }
            }
            if dropped > 0 {
                warn!(dropped, "Duplicate SSH public keys removed");
            }
            keys
        }
    }
}

/// イメージ参照テンプレートにサブスクリプションIDを埋め込む
pub fn render_image_reference(template: &str, subscription_id: &str) -> Result<String> {
    if subscription_id.trim().is_empty() {
        return Err(StackError::MissingSubscriptionId);
    }
    Ok(template.replace(SUBSCRIPTION_PLACEHOLDER, subscription_id))
}

/// VM宣言をコンパイル
///
/// サブスクリプションIDが空の場合は、宣言を1つも生成せずにエラーを返す。
pub fn compile<'a>(
    config: &StackConfig,
    credentials: &CredentialBundle,
    members: &[MemberRecord],
    network: &'a NetworkContext,
    identities: &[ControllerIdentity],
) -> Result<Vec<VmDeclaration<'a>>> {
    let image_reference =
        render_image_reference(&config.image_template, &credentials.subscription_id)?;
    let ssh_public_keys = aggregate_ssh_keys(members, config.key_policy);
    debug!(
        keys = ssh_public_keys.len(),
        members = members.len(),
        "SSH public keys aggregated"
    );

    let declarations = identities
        .iter()
        .map(|identity| VmDeclaration {
            vm_name: identity.name.clone(),
            environment: config.env.clone(),
            stack_name: config.name.clone(),
            size: config.vm_size.clone(),
            network,
            private_address: identity.private_address,
            ssh_public_keys: ssh_public_keys.clone(),
            image_reference: image_reference.clone(),
        })
        .collect();

    Ok(declarations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::allocate;
    use crate::network::build_network;
    use std::net::Ipv4Addr;

    fn config() -> StackConfig {
        let mut config = StackConfig::new("stg", "leader");
        config.name_pool = ["alpha", "bravo", "charlie", "delta", "echo"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        config
    }

    fn creds(subscription_id: &str) -> CredentialBundle {
        CredentialBundle::new(subscription_id, "tenant", "client", "secret")
    }

    #[test]
    fn test_compile_one_declaration_per_identity() {
        let config = config();
        let network = build_network(&config.env, &config.name);
        let identities = allocate(3, &config.name_pool, &config.address_plan).unwrap();
        let members = vec![MemberRecord::new("a").with_keys(["k1"])];

        let vms = compile(&config, &creds("sub-123"), &members, &network, &identities).unwrap();

        assert_eq!(vms.len(), 3);
        for (vm, id) in vms.iter().zip(&identities) {
            assert_eq!(vm.vm_name, id.name);
            assert_eq!(vm.private_address, id.private_address);
            assert_eq!(vm.size, "Standard_D2s_v4");
            assert_eq!(vm.environment, "stg");
            assert_eq!(vm.network.subnet_name, "stg-subnet-leader");
            assert!(vm.image_reference.contains("sub-123"));
            assert!(!vm.image_reference.contains(SUBSCRIPTION_PLACEHOLDER));
        }
        assert_eq!(vms[2].private_address, Ipv4Addr::new(10, 0, 0, 12));
    }

    #[test]
    fn test_compile_shares_network_context() {
        let config = config();
        let network = build_network(&config.env, &config.name);
        let identities = allocate(2, &config.name_pool, &config.address_plan).unwrap();

        let vms = compile(&config, &creds("sub-123"), &[], &network, &identities).unwrap();
        assert!(std::ptr::eq(vms[0].network, vms[1].network));
    }

    #[test]
    fn test_compile_empty_identities() {
        let config = config();
        let network = build_network(&config.env, &config.name);
        let vms = compile(&config, &creds("sub-123"), &[], &network, &[]).unwrap();
        assert!(vms.is_empty());
    }

    #[test]
    fn test_compile_requires_subscription() {
        let config = config();
        let network = build_network(&config.env, &config.name);
        let identities = allocate(3, &config.name_pool, &config.address_plan).unwrap();

        for sub in ["", "   "] {
            let err = compile(&config, &creds(sub), &[], &network, &identities).unwrap_err();
            assert!(matches!(err, StackError::MissingSubscriptionId));
        }
    }

    #[test]
    fn test_aggregate_skips_members_without_keys() {
        let members = vec![
            MemberRecord::new("a").with_keys(["k1", "k2"]),
            MemberRecord::new("b"),
        ];
        assert_eq!(
            aggregate_ssh_keys(&members, KeyMergePolicy::Deduplicate),
            vec!["k1", "k2"]
        );
        assert_eq!(
            aggregate_ssh_keys(&members, KeyMergePolicy::Concatenate),
            vec!["k1", "k2"]
        );
    }

    #[test]
    fn test_aggregate_empty_key_list() {
        let members = vec![MemberRecord::new("a").with_keys(Vec::<String>::new())];
        assert!(aggregate_ssh_keys(&members, KeyMergePolicy::Deduplicate).is_empty());
    }

    #[test]
    fn test_aggregate_duplicate_keys() {
        let members = vec![
            MemberRecord::new("a").with_keys(["k1", "k2"]),
            MemberRecord::new("b").with_keys(["k2", "k3"]),
        ];
        assert_eq!(
            aggregate_ssh_keys(&members, KeyMergePolicy::Deduplicate),
            vec!["k1", "k2", "k3"]
        );
        assert_eq!(
            aggregate_ssh_keys(&members, KeyMergePolicy::Concatenate),
            vec!["k1", "k2", "k2", "k3"]
        );
    }

    #[test]
    fn test_render_image_reference() {
        let reference =
            render_image_reference(crate::model::DEFAULT_IMAGE_TEMPLATE, "sub-123").unwrap();
        assert_eq!(
            reference,
            "/subscriptions/sub-123/resourceGroups/ops-rg-machine-images/providers/Microsoft.Compute/images/NOMAD-CONSUL-eastus-220718-1345"
        );
    }
}
