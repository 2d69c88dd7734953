//! 到達性ポーリングモジュール（Exponential Backoff）
//!
//! 各サービスの外部から観測可能なHTTPエンドポイントが成功ステータスを
//! 返すまで待機します。無限に待ち続けるのではなく、リトライ上限に達したら
//! `ReadinessTimeout` を返します。順序依存のないエンドポイント同士は
//! 並行してポーリングします。

use crate::error::{ContainerError, Result};
use futures_util::future::try_join_all;
use minato_core::ReadinessProbe;
use std::time::Duration;
use tokio::time::sleep;

/// 待機設定（exponential backoff）
#[derive(Debug, Clone)]
pub struct WaitConfig {
    /// 最大リトライ回数
    pub max_retries: u32,
    /// 初期待機時間（ミリ秒）
    pub initial_delay_ms: u64,
    /// 最大待機時間（ミリ秒）
    pub max_delay_ms: u64,
    /// Exponential倍率
    pub multiplier: f64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            max_retries: 60,
            initial_delay_ms: 1000,
            max_delay_ms: 5000,
            multiplier: 1.5,
        }
    }
}

impl WaitConfig {
    /// 指定回数目の待機時間を計算（ミリ秒）
    pub fn delay_for_attempt(&self, attempt: u32) -> u64 {
        let delay = self.initial_delay_ms as f64 * self.multiplier.powi(attempt as i32);
        (delay as u64).min(self.max_delay_ms)
    }

    /// 合計待機時間がbudget以上になるリトライ回数を逆算する
    ///
    /// タイムアウトは「budget経過以降」に発生することが保証されます
    /// （budgetより早く諦めることはない）。
    pub fn with_budget(budget: Duration) -> Self {
        let mut config = Self::default();
        let budget_ms = budget.as_millis() as u64;

        let mut total = 0u64;
        let mut attempts = 0u32;
        while total < budget_ms {
            total += config.delay_for_attempt(attempts);
            attempts += 1;
        }

        // 最後の試行の後は待機しないため1回分多く試行する
        config.max_retries = attempts + 1;
        config
    }
}

/// 単一エンドポイントの準備完了を待機
///
/// 初回試行で成功した場合は一度もスリープせずに返ります。
pub async fn wait_for_endpoint(
    client: &reqwest::Client,
    url: &str,
    config: &WaitConfig,
) -> Result<()> {
    for attempt in 0..config.max_retries {
        if check_endpoint(client, url).await {
            tracing::debug!("エンドポイント準備完了: {} ({}回目)", url, attempt + 1);
            return Ok(());
        }

        // 最後の試行でなければ待機
        if attempt + 1 < config.max_retries {
            let delay_ms = config.delay_for_attempt(attempt);
            sleep(Duration::from_millis(delay_ms)).await;
        }
    }

    Err(ContainerError::ReadinessTimeout {
        url: url.to_string(),
        max_retries: config.max_retries,
    })
}

/// 複数エンドポイントの準備完了を並行して待機
///
/// いずれかがタイムアウトした時点でエラーを返します。
pub async fn wait_ready(probes: &[&ReadinessProbe], config: &WaitConfig) -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .map_err(|e| ContainerError::HttpClient(e.to_string()))?;

    try_join_all(
        probes
            .iter()
            .map(|probe| wait_for_endpoint(&client, &probe.url, config)),
    )
    .await?;

    Ok(())
}

/// エンドポイントが成功ステータスを返すか確認
async fn check_endpoint(client: &reqwest::Client, url: &str) -> bool {
    match client.get(url).send().await {
        Ok(response) => response.status().is_success(),
        Err(_) => false,
    }
}
