//! stack ノードのパース

use super::{all_strings, required_count, required_string};
use crate::error::{Result, StackError};
use crate::model::{AddressPlan, StackConfig};
use kdl::KdlNode;
use std::path::PathBuf;

/// stack ノードをパース
///
/// 未指定の項目はデフォルト値のまま。`env` は必須。
pub fn parse_stack(node: &KdlNode) -> Result<StackConfig> {
    let name = required_string(node)
        .map_err(|_| StackError::InvalidConfig("stack requires a name".to_string()))?;

    let mut env: Option<String> = None;
    let mut config = StackConfig::new("", name);

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "env" => {
                    env = Some(required_string(child)?);
                }
                "location" => {
                    config.location = required_string(child)?;
                }
                "controllers" => {
                    let count = required_count(child)?;
                    config.controllers = usize::try_from(count).map_err(|_| {
                        StackError::InvalidConfig(format!(
                            "controllers must be a non-negative integer: {}",
                            count
                        ))
                    })?;
                }
                "vm_size" | "vm-size" | "size" => {
                    config.vm_size = required_string(child)?;
                }
                "names" | "name-pool" | "name_pool" => {
                    // 複数の名前を引数として受け取る（順序を維持）
                    config.name_pool = all_strings(child)?;
                }
                "network" => {
                    parse_network(child, &mut config.address_plan)?;
                }
                "image" => {
                    config.image_template = required_string(child)?;
                }
                "members" => {
                    config.members_path = Some(PathBuf::from(required_string(child)?));
                }
                "ssh_keys" | "ssh-keys" => {
                    config.key_policy = required_string(child)?.parse()?;
                }
                other => {
                    tracing::debug!("Ignoring unknown stack setting: {}", other);
                }
            }
        }
    }

    config.env = env.ok_or_else(|| {
        StackError::InvalidConfig(format!("stack '{}' requires env", config.name))
    })?;

    Ok(config)
}

/// network ブロックをパース
pub fn parse_network(node: &KdlNode, plan: &mut AddressPlan) -> Result<()> {
    let Some(children) = node.children() else {
        return Ok(());
    };

    for child in children.nodes() {
        match child.name().value() {
            "address_space" | "address-space" => {
                plan.address_space = required_string(child)?.parse()?;
            }
            "subnet" => {
                plan.subnet = required_string(child)?.parse()?;
            }
            "base_offset" | "base-offset" => {
                let offset = required_count(child)?;
                plan.base_offset = u32::try_from(offset).map_err(|_| {
                    StackError::InvalidConfig(format!("invalid base-offset: {}", offset))
                })?;
            }
            other => {
                tracing::debug!("Ignoring unknown network setting: {}", other);
            }
        }
    }

    Ok(())
}
