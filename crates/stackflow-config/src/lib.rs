pub mod error;

pub use error::*;

use std::path::{Path, PathBuf};

/// スタックファイルのパスを直接指定する環境変数
pub const CONFIG_PATH_ENV: &str = "STACKFLOW_CONFIG_PATH";

const CANDIDATES: [&str; 4] = ["stack.local.kdl", ".stack.local.kdl", "stack.kdl", ".stack.kdl"];

/// グローバルのスタックファイル（~/.config/stackflow/stack.kdl）
pub fn global_stack_file() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(config_dir.join("stackflow").join("stack.kdl"))
}

/// カレントディレクトリを起点にスタックファイルを探す
///
/// 以下の優先順位で設定ファイルを検索:
/// 1. 環境変数 STACKFLOW_CONFIG_PATH (直接パス指定)
/// 2. カレントディレクトリ: stack.local.kdl, .stack.local.kdl, stack.kdl, .stack.kdl
/// 3. ./.stackflow/ ディレクトリ内: 同様の順序
/// 4. ~/.config/stackflow/stack.kdl (グローバル設定)
pub fn find_stack_file() -> Result<PathBuf> {
    let current_dir = std::env::current_dir()?;
    find_stack_file_from(&current_dir)
}

/// 指定ディレクトリを起点にスタックファイルを探す
pub fn find_stack_file_from(dir: &Path) -> Result<PathBuf> {
    // 1. 環境変数で直接指定（指定されたのに存在しない場合はエラー）
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(&config_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::ConfigPathMissing(config_path));
    }

    // 2. 指定ディレクトリで検索
    if let Some(path) = first_existing(dir) {
        return Ok(path);
    }

    // 3. ./.stackflow/ ディレクトリで検索
    let stack_dir = dir.join(".stackflow");
    if stack_dir.is_dir()
        && let Some(path) = first_existing(&stack_dir)
    {
        return Ok(path);
    }

    // 4. グローバル設定ファイル
    if let Ok(global) = global_stack_file()
        && global.exists()
    {
        return Ok(global);
    }

    Err(ConfigError::StackFileNotFound)
}

fn first_existing(dir: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|filename| dir.join(filename))
        .find(|path| path.exists())
}
