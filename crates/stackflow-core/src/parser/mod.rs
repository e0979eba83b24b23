//! KDLパーサー
//!
//! stack.kdl をパースして [`StackConfig`] を生成します。

mod stack;

pub use stack::{parse_network, parse_stack};

use crate::error::{Result, StackError};
use crate::model::StackConfig;
use kdl::{KdlDocument, KdlNode};
use std::fs;
use std::path::Path;

/// KDLファイルをパースしてStackConfigを生成
pub fn parse_kdl_file<P: AsRef<Path>>(path: P) -> Result<StackConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| StackError::IoError {
        path: path.as_ref().to_path_buf(),
        message: e.to_string(),
    })?;
    parse_kdl_string(&content)
}

/// KDL文字列をパース
///
/// トップレベルの `stack` ノードがちょうど1つ必要。
pub fn parse_kdl_string(content: &str) -> Result<StackConfig> {
    let doc: KdlDocument = content.parse()?;

    let mut stacks = doc
        .nodes()
        .iter()
        .filter(|node| node.name().value() == "stack");

    let node = stacks
        .next()
        .ok_or_else(|| StackError::InvalidConfig("stack ノードがありません".to_string()))?;
    if stacks.next().is_some() {
        return Err(StackError::InvalidConfig(
            "stack ノードは1ファイルに1つまでです".to_string(),
        ));
    }

    parse_stack(node)
}

pub(crate) fn first_string(node: &KdlNode) -> Option<String> {
    node.entries()
        .first()
        .and_then(|e| e.value().as_string())
        .map(|s| s.to_string())
}

pub(crate) fn first_integer(node: &KdlNode) -> Option<i128> {
    node.entries().first().and_then(|e| e.value().as_integer())
}

/// すべての引数を文字列として取得（文字列以外が混ざればエラー）
pub(crate) fn all_strings(node: &KdlNode) -> Result<Vec<String>> {
    node.entries()
        .iter()
        .map(|e| {
            e.value().as_string().map(|s| s.to_string()).ok_or_else(|| {
                StackError::InvalidConfig(format!(
                    "{} accepts only string values (found {})",
                    node.name().value(),
                    e.value()
                ))
            })
        })
        .collect()
}

pub(crate) fn required_string(node: &KdlNode) -> Result<String> {
    first_string(node).ok_or_else(|| {
        StackError::InvalidConfig(format!("{} requires a string value", node.name().value()))
    })
}

pub(crate) fn required_count(node: &KdlNode) -> Result<i128> {
    first_integer(node).ok_or_else(|| {
        StackError::InvalidConfig(format!("{} requires an integer value", node.name().value()))
    })
}
