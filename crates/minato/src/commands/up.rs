//! upコマンド - スタックの起動
//!
//! チェック → 生成 → 再作成 → 起動 → 到達性待機 の直列ワークフロー。
//! 各ステップは冪等であり、既に目的の状態であれば何度実行しても
//! 同じ結果に収束します。

use crate::provision::{ProvisionLogger, ProvisionStep};
use crate::shortcut;
use anyhow::Context;
use colored::Colorize;
use minato_container::{engine, lifecycle, waiter, ComposeCli, WaitConfig};
use minato_core::{config, manifest, Profile, StackOptions};
use std::time::Duration;

pub async fn handle(
    profile: Profile,
    opts: StackOptions,
    timeout_secs: u64,
    no_wait: bool,
    install_shortcut: bool,
) -> anyhow::Result<()> {
    println!();
    println!(
        "{} プロファイル '{}' を起動します",
        "▶".cyan().bold(),
        profile.as_str().cyan().bold()
    );

    // シークレット解決と検証はここで完結する。
    // 不備があればコンテナに一切触れる前に失敗する。
    let stack = profile.stack(&opts)?;
    let service_names = stack.service_names();
    tracing::debug!(
        "スタック構築完了: {} ({}サービス)",
        stack.name,
        service_names.len()
    );
    println!(
        "  {} サービス: {}",
        "ℹ".blue(),
        service_names.join(", ").dimmed()
    );
    println!();

    let mut logger = ProvisionLogger::new();

    // エンジン確認
    logger.start_step(ProvisionStep::CheckEngine);
    let docker = match engine::wait_engine_ready(&engine::engine_wait_config()).await {
        Ok(docker) => {
            logger.step_success(Some("コンテナエンジン応答あり"));
            docker
        }
        Err(e) => return fail(logger, profile, e.into()),
    };

    // マニフェスト生成
    logger.start_step(ProvisionStep::RenderManifest);
    let manifest_path = config::manifest_path(profile)?;
    match manifest::write_manifest(&stack, &manifest_path) {
        Ok(()) => {
            logger.log_detail(&format!("書き込み先: {}", manifest_path.display()));
            logger.step_success(None);
        }
        Err(e) => return fail(logger, profile, e.into()),
    }

    // 既存コンテナ削除
    logger.start_step(ProvisionStep::ResetContainers);
    match lifecycle::reset_containers(&docker, &service_names).await {
        Ok(()) => logger.step_success(None),
        Err(e) => return fail(logger, profile, e.into()),
    }

    // スタック起動
    logger.start_step(ProvisionStep::StartStack);
    let compose = ComposeCli::new(&manifest_path);
    match compose.up().await {
        Ok(()) => logger.step_success(None),
        Err(e) => return fail(logger, profile, e.into()),
    }

    // 到達性待機
    logger.start_step(ProvisionStep::WaitReady);
    if no_wait {
        logger.step_skipped("--no-wait 指定");
    } else {
        let probes = stack.readiness_probes();
        let wait_config = WaitConfig::with_budget(Duration::from_secs(timeout_secs));
        for probe in &probes {
            logger.log_detail(&format!("待機対象: {}", probe.url));
        }
        match waiter::wait_ready(&probes, &wait_config).await {
            Ok(()) => logger.step_success(Some("全エンドポイント到達可能")),
            Err(e) => return fail(logger, profile, e.into()),
        }
    }

    // ショートカット作成
    logger.start_step(ProvisionStep::InstallShortcut);
    if install_shortcut {
        let webui_url = format!("http://localhost:{}", opts.webui_port);
        let dest = shortcut::default_shortcut_path()
            .context("デスクトップディレクトリが見つかりません")?;
        match shortcut::install_shortcut(&webui_url, &dest) {
            Ok(()) => {
                logger.log_detail(&format!("作成先: {}", dest.display()));
                logger.step_success(None);
            }
            Err(e) => return fail(logger, profile, e.into()),
        }
    } else {
        logger.step_skipped("--shortcut 未指定");
    }

    logger.print_summary(profile.as_str());

    println!();
    println!("{} スタックが起動しました", "✓".green().bold());
    println!(
        "  {} Web UI:  {}",
        "ℹ".blue(),
        format!("http://localhost:{}", opts.webui_port).green()
    );
    println!(
        "  {} Ollama:  {}",
        "ℹ".blue(),
        format!("http://localhost:{}", opts.ollama_port).green()
    );
    if profile == Profile::Automation {
        println!(
            "  {} n8n:     {}",
            "ℹ".blue(),
            format!("http://localhost:{}", opts.n8n_port).green()
        );
        println!(
            "  {} Qdrant:  {}",
            "ℹ".blue(),
            format!("http://localhost:{}", opts.qdrant_port).green()
        );
    }

    Ok(())
}

/// 失敗したステップを記録し、サマリーを出してからエラーを伝播する
fn fail(mut logger: ProvisionLogger, profile: Profile, error: anyhow::Error) -> anyhow::Result<()> {
    logger.step_failed(&error.to_string());
    logger.print_summary(profile.as_str());
    Err(error)
}
