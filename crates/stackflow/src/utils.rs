use colored::Colorize;
use std::path::{Path, PathBuf};

/// CLI からのスタック設定の上書き
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StackArgs {
    /// スタックファイルのパス（省略時は自動検出）
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,
    /// 環境名を上書き (stg, prod など)
    #[arg(short, long, env = "STACKFLOW_ENV")]
    pub env: Option<String>,
    /// スタック名を上書き
    #[arg(short, long)]
    pub name: Option<String>,
    /// コントローラー台数を上書き
    #[arg(short, long)]
    pub controllers: Option<usize>,
}

/// スタックファイルを決定してロードし、上書きを適用する
pub fn load_stack(args: &StackArgs) -> anyhow::Result<(PathBuf, stackflow_core::StackConfig)> {
    let path = match &args.file {
        Some(path) => path.clone(),
        None => stackflow_config::find_stack_file()?,
    };

    let mut config = stackflow_core::load_stack(&path)?;
    if let Some(env) = &args.env {
        config.env = env.clone();
    }
    if let Some(name) = &args.name {
        config.name = name.clone();
    }
    if let Some(controllers) = args.controllers {
        config.controllers = controllers;
    }

    Ok((path, config))
}

/// 読み込んだスタックファイルを表示
pub fn print_loaded_stack_file(path: &Path) {
    eprintln!("📄 読み込んだスタックファイル:");
    eprintln!("  • {}", path.display().to_string().cyan());
}
