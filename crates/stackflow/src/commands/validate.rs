use crate::utils::{self, StackArgs};
use colored::Colorize;
use stackflow_core::{
    CredentialBundle, SUBSCRIPTION_PLACEHOLDER, aggregate_ssh_keys, allocate, build_graph,
    build_network_with, member_directory,
};

pub fn handle(args: &StackArgs) -> anyhow::Result<()> {
    println!("{}", "スタック設定を検証中...".blue());

    let (path, config) = utils::load_stack(args)?;
    utils::print_loaded_stack_file(&path);

    config.validate()?;
    let members = member_directory(&config).members()?;

    // 認証情報なしで検証するため、サブスクリプションIDはプレースホルダーのまま
    let placeholder = CredentialBundle::new(SUBSCRIPTION_PLACEHOLDER, "", "", "");
    let graph = build_graph(&config, &placeholder, &members)?;

    let network = build_network_with(
        &config.env,
        &config.name,
        &config.location,
        &config.address_plan,
    );
    let controllers = allocate(config.controllers, &config.name_pool, &config.address_plan)?;

    println!("{}", "✓ スタック設定は正常です！".green().bold());
    println!();
    println!("サマリー:");
    println!("  環境: {}", config.env.cyan());
    println!("  スタック: {}", config.name.cyan());
    println!(
        "  リソースグループ: {} ({})",
        network.resource_group_name.cyan(),
        network.resource_group_location
    );
    println!(
        "  VNet: {} ({})",
        network.virtual_network_name.cyan(),
        network.address_space
    );
    println!(
        "  サブネット: {} ({})",
        network.subnet_name.cyan(),
        network.subnet_prefix
    );
    println!(
        "  コントローラー: {}台 / 名前プール {}個",
        controllers.len(),
        config.name_pool.len()
    );
    for controller in &controllers {
        println!(
            "    - {} ({}, {})",
            controller.name.cyan(),
            controller.private_address,
            config.vm_size
        );
    }
    match &config.members_path {
        Some(path) => println!(
            "  メンバー: {} ({}人, SSH公開鍵 {}件)",
            path.display(),
            members.len(),
            aggregate_ssh_keys(&members, config.key_policy).len()
        ),
        None => println!("  メンバー: {}", "(未設定)".yellow()),
    }
    println!("  リソース: {}件", graph.len());

    Ok(())
}
