use crate::utils::{self, StackArgs};
use colored::Colorize;
use stackflow_cloud::{ApplyResult, JsonFileBackend, ProvisioningBackend};
use stackflow_core::{EnvCredentialProvider, build_stack, member_directory};
use std::path::Path;

pub async fn handle(args: &StackArgs, out_dir: &Path, stdout: bool) -> anyhow::Result<()> {
    let (path, config) = utils::load_stack(args)?;
    utils::print_loaded_stack_file(&path);

    eprintln!(
        "{} {}",
        "スタックをビルド中:".blue(),
        config.slug().cyan().bold()
    );

    let directory = member_directory(&config);
    let build = build_stack(&config, &EnvCredentialProvider::new(), &*directory)?;

    if stdout {
        println!("{}", build.graph.to_json()?);
        return Ok(());
    }

    let file_backend = JsonFileBackend::new(out_dir, config.slug());
    let graph_path = file_backend.graph_path();
    let backend: Box<dyn ProvisioningBackend> = Box::new(file_backend);
    let result = backend.submit(&build.graph, &build.credentials).await?;

    report_apply_result(&result, backend.name())?;

    println!();
    println!(
        "{} {} 件のリソースを宣言しました ({}, {}ms)",
        "✓".green().bold(),
        result.succeeded.len(),
        backend.name(),
        result.duration_ms
    );
    println!("  出力: {}", graph_path.display().to_string().cyan());
    Ok(())
}

/// リソースごとの結果を表示し、失敗があればエラーを返す
fn report_apply_result(result: &ApplyResult, backend_name: &str) -> anyhow::Result<()> {
    for resource in &result.succeeded {
        println!("  {} {}", "✓".green(), resource.resource_key);
    }
    for resource in &result.failed {
        println!(
            "  {} {}: {}",
            "✗".red(),
            resource.resource_key,
            resource.error.as_deref().unwrap_or("unknown error")
        );
    }

    if !result.is_success() {
        anyhow::bail!(
            "{} 件のリソースを {} に渡せませんでした",
            result.failed.len(),
            backend_name
        );
    }
    Ok(())
}
