mod commands;
mod utils;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use utils::StackArgs;

#[derive(Parser)]
#[command(name = "stackflow")]
#[command(about = "リーダークラスタのトポロジーを宣言する", long_about = None)]
struct Cli {
    /// デバッグログを出力
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// リソースグラフを生成してバックエンドに渡す
    Synth {
        #[command(flatten)]
        stack: StackArgs,
        /// 出力ディレクトリ
        #[arg(short, long, default_value = "stackflow.out")]
        out: PathBuf,
        /// ファイルに書かず標準出力に表示
        #[arg(long)]
        stdout: bool,
    },
    /// スタック設定を検証
    Validate {
        #[command(flatten)]
        stack: StackArgs,
    },
    /// バージョン情報を表示
    Version,
}

fn init_tracing(verbose: bool) {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if verbose {
        filter = filter.add_directive(tracing::Level::DEBUG.into());
    }
    // stdout はグラフ出力に使うのでログは stderr へ
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Synth { stack, out, stdout } => {
            commands::synth::handle(&stack, &out, stdout).await?;
        }
        Commands::Validate { stack } => {
            commands::validate::handle(&stack)?;
        }
        Commands::Version => {
            println!("stackflow {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
