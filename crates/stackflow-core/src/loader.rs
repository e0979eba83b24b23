//! 統合ローダー
//!
//! stack.kdl のパースと、相対パスの解決・メンバーディレクトリの選択を統合

use crate::error::Result;
use crate::model::StackConfig;
use crate::parser::parse_kdl_file;
use crate::source::{IdentityDirectory, JsonMemberDirectory, StaticDirectory};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// スタックファイルをロード
///
/// `members` の相対パスはスタックファイルのディレクトリ基準で解決する。
/// 検証はビルド時（CLI の上書き適用後）に行う。
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_stack(path: &Path) -> Result<StackConfig> {
    let mut config = parse_kdl_file(path)?;

    if let Some(members) = &config.members_path
        && members.is_relative()
        && let Some(base) = path.parent()
    {
        let resolved = base.join(members);
        debug!("Resolved members path: {}", resolved.display());
        config.members_path = Some(resolved);
    }

    info!(
        env = %config.env,
        stack = %config.name,
        controllers = config.controllers,
        "Stack loaded"
    );
    Ok(config)
}

/// 設定に応じたメンバーディレクトリ
///
/// `members` 未指定の場合は空のディレクトリ（SSH鍵なし）になる。
pub fn member_directory(config: &StackConfig) -> Box<dyn IdentityDirectory> {
    match &config.members_path {
        Some(path) => Box::new(JsonMemberDirectory::new(path)),
        None => {
            warn!("members が指定されていません。SSH公開鍵なしでビルドします");
            Box::new(StaticDirectory::default())
        }
    }
}
