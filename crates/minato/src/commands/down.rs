//! downコマンド - スタックの停止・破棄
//!
//! マニフェストが残っていればcompose経由で破棄し、残っていなければ
//! コンテナ名で直接削除します。名前付きボリュームはデフォルトで保持し、
//! `--volumes` 指定時のみ削除します。

use colored::Colorize;
use minato_container::{engine, lifecycle, ComposeCli};
use minato_core::{config, Profile};

pub async fn handle(profile: Profile, remove_volumes: bool) -> anyhow::Result<()> {
    println!();
    println!(
        "{} プロファイル '{}' を停止します",
        "▶".cyan().bold(),
        profile.as_str().cyan().bold()
    );
    if remove_volumes {
        println!(
            "  {} 名前付きボリュームも削除します（モデル・履歴データが消えます）",
            "⚠".yellow()
        );
    }
    println!();

    let manifest_path = config::manifest_path(profile)?;
    tracing::debug!("マニフェスト参照先: {}", manifest_path.display());

    if manifest_path.exists() {
        let compose = ComposeCli::new(&manifest_path);
        compose.down(remove_volumes).await?;
    } else {
        // マニフェストが無い場合はコンテナ名で直接落とす。
        // この経路ではボリュームは削除できない。
        println!(
            "  {} マニフェストが見つからないため、コンテナを直接削除します",
            "ℹ".blue()
        );
        let docker = engine::connect().await?;
        lifecycle::reset_containers(&docker, profile.service_names()).await?;

        if remove_volumes {
            println!(
                "  {} ボリュームは削除されませんでした（マニフェストなし）",
                "⚠".yellow()
            );
        }
    }

    println!("{} スタックを停止しました", "✓".green().bold());
    Ok(())
}
