//! プロビジョニングの進捗記録
//!
//! check → generate → teardown → bring-up → poll → integrate の
//! 直列なワークフローを、ステップごとに進捗・所要時間付きで記録する。

use chrono::Local;
use colored::Colorize;
use std::time::{Duration, Instant};

/// プロビジョニングの各ステップ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionStep {
    /// エンジン到達性チェック
    CheckEngine,
    /// マニフェスト生成
    RenderManifest,
    /// 既存コンテナの削除
    ResetContainers,
    /// スタック起動
    StartStack,
    /// 到達性待機
    WaitReady,
    /// ショートカット作成
    InstallShortcut,
}

impl ProvisionStep {
    /// ステップの日本語名
    pub fn name(&self) -> &'static str {
        match self {
            Self::CheckEngine => "エンジン確認",
            Self::RenderManifest => "マニフェスト生成",
            Self::ResetContainers => "既存コンテナ削除",
            Self::StartStack => "スタック起動",
            Self::WaitReady => "到達性待機",
            Self::InstallShortcut => "ショートカット作成",
        }
    }
}

/// ステップの実行結果
#[derive(Debug, Clone)]
pub enum StepResult {
    /// 成功
    Success { duration: Duration },
    /// スキップ（フラグ未指定等）
    Skipped { reason: String },
    /// 失敗
    Failed { error: String, duration: Duration },
}

impl StepResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::Skipped { .. })
    }

    pub fn duration(&self) -> Option<Duration> {
        match self {
            Self::Success { duration } => Some(*duration),
            Self::Failed { duration, .. } => Some(*duration),
            Self::Skipped { .. } => None,
        }
    }
}

/// プロビジョニングログ出力器
pub struct ProvisionLogger {
    start_time: Instant,
    step_results: Vec<(ProvisionStep, StepResult)>,
    current_step: Option<(ProvisionStep, Instant)>,
}

impl ProvisionLogger {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            step_results: Vec::new(),
            current_step: None,
        }
    }

    /// ステップ開始をログ出力
    pub fn start_step(&mut self, step: ProvisionStep) {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        println!("[{}] {} {}", timestamp.dimmed(), "▶".cyan(), step.name());
        self.current_step = Some((step, Instant::now()));
    }

    /// ステップ成功をログ出力
    pub fn step_success(&mut self, message: Option<&str>) {
        if let Some((step, start)) = self.current_step.take() {
            let duration = start.elapsed();
            let timestamp = Local::now().format("%H:%M:%S").to_string();
            let duration_str = format_duration(duration);

            let msg = message.unwrap_or_else(|| step.name());
            println!(
                "[{}] {} {} ({})",
                timestamp.dimmed(),
                "✓".green().bold(),
                msg,
                duration_str.dimmed()
            );

            self.step_results
                .push((step, StepResult::Success { duration }));
        }
    }

    /// ステップスキップをログ出力
    pub fn step_skipped(&mut self, reason: &str) {
        if let Some((step, _)) = self.current_step.take() {
            let timestamp = Local::now().format("%H:%M:%S").to_string();
            println!(
                "[{}] {} {} ({})",
                timestamp.dimmed(),
                "⏭".yellow(),
                step.name(),
                reason.dimmed()
            );

            self.step_results.push((
                step,
                StepResult::Skipped {
                    reason: reason.to_string(),
                },
            ));
        }
    }

    /// ステップ失敗をログ出力
    pub fn step_failed(&mut self, error: &str) {
        if let Some((step, start)) = self.current_step.take() {
            let duration = start.elapsed();
            let timestamp = Local::now().format("%H:%M:%S").to_string();

            println!(
                "[{}] {} {}: {}",
                timestamp.dimmed(),
                "✗".red().bold(),
                step.name(),
                error.red()
            );

            self.step_results.push((
                step,
                StepResult::Failed {
                    error: error.to_string(),
                    duration,
                },
            ));
        }
    }

    /// 詳細メッセージをログ出力
    pub fn log_detail(&self, message: &str) {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        println!("[{}]   → {}", timestamp.dimmed(), message.cyan());
    }

    /// サマリーを出力
    pub fn print_summary(&self, profile_name: &str) {
        let total_duration = self.start_time.elapsed();

        let error_count = self
            .step_results
            .iter()
            .filter(|(_, result)| matches!(result, StepResult::Failed { .. }))
            .count();

        let slowest_step = self
            .step_results
            .iter()
            .filter_map(|(step, result)| result.duration().map(|d| (step, d)))
            .max_by_key(|(_, d)| *d);

        println!();
        println!("{}", "═".repeat(44));
        println!("Provision Summary: {}", profile_name.cyan().bold());
        println!("{}", "─".repeat(44));
        println!("Total time:    {}", format_duration(total_duration).green());

        if let Some((step, duration)) = slowest_step {
            println!(
                "Slowest step:  {} ({})",
                step.name(),
                format_duration(duration)
            );
        }

        if error_count > 0 {
            println!("Errors:        {}", error_count.to_string().red().bold());
        } else {
            println!("Errors:        {}", "0".green());
        }
        println!("{}", "═".repeat(44));
    }

    /// 全ステップが成功したか
    pub fn all_success(&self) -> bool {
        self.step_results
            .iter()
            .all(|(_, result)| result.is_success())
    }
}

impl Default for ProvisionLogger {
    fn default() -> Self {
        Self::new()
    }
}

/// Duration を読みやすい形式にフォーマット
fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if total_secs >= 60 {
        let minutes = total_secs / 60;
        let secs = total_secs % 60;
        format!("{}m {}s", minutes, secs)
    } else if total_secs >= 1 {
        format!("{}.{}s", total_secs, millis / 100)
    } else {
        format!("{}ms", millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
    }

    #[test]
    fn test_logger_tracks_results() {
        let mut logger = ProvisionLogger::new();

        logger.start_step(ProvisionStep::CheckEngine);
        logger.step_success(None);

        logger.start_step(ProvisionStep::InstallShortcut);
        logger.step_skipped("--shortcut 未指定");

        assert!(logger.all_success());

        logger.start_step(ProvisionStep::StartStack);
        logger.step_failed("compose が失敗");
        assert!(!logger.all_success());
    }
}
