//! psコマンド - コンテナ状態の表示
//!
//! エンジンに問い合わせた瞬間のスナップショットを表形式で出力します。

use colored::Colorize;
use minato_container::{engine, state, ContainerState};
use minato_core::Profile;

pub async fn handle(profile: Profile) -> anyhow::Result<()> {
    let docker = engine::connect().await?;
    let stack_state = state::observe(&docker, profile.service_names()).await?;

    println!();
    println!(
        "{} プロファイル: {}",
        "ℹ".blue(),
        profile.as_str().cyan().bold()
    );
    println!();

    println!(
        "{:<12} {:<10} {:<22} {:<36} {}",
        "NAME".bold(),
        "STATE".bold(),
        "STATUS".bold(),
        "IMAGE".bold(),
        "PORTS".bold()
    );

    for service in &stack_state.services {
        let state_str = match service.state {
            ContainerState::Running => "running".green().to_string(),
            ContainerState::Stopped => "stopped".red().to_string(),
            ContainerState::Absent => "absent".dimmed().to_string(),
        };

        println!(
            "{:<12} {:<19} {:<22} {:<36} {}",
            service.name,
            state_str,
            service.status.as_deref().unwrap_or("-"),
            service.image.as_deref().unwrap_or("-"),
            if service.ports.is_empty() {
                "-".to_string()
            } else {
                service.ports.join(", ")
            }
        );
    }

    println!();
    if stack_state.all_running() {
        println!("{} 全サービスが稼働中です", "✓".green().bold());
    } else {
        println!(
            "{} 一部のサービスが稼働していません（`minato up {}` で起動できます）",
            "⚠".yellow(),
            profile.as_str()
        );
    }

    Ok(())
}
