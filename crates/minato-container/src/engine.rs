//! コンテナエンジンへの接続と到達性チェック
//!
//! 元の手順では2秒間隔の無限ループでエンジンの起動を待っていました。
//! ここでは上限付きのexponential backoffに置き換え、上限に達したら
//! `EngineUnavailable` を返します。副作用のない読み取り専用プローブです。

use crate::error::{ContainerError, Result};
use crate::waiter::WaitConfig;
use bollard::Docker;
use std::time::Duration;
use tokio::time::sleep;

/// エンジン到達性チェックのデフォルト待機設定
pub fn engine_wait_config() -> WaitConfig {
    WaitConfig {
        max_retries: 10,
        initial_delay_ms: 1000,
        max_delay_ms: 10000,
        multiplier: 2.0,
    }
}

/// エンジンに接続し、pingで応答を確認する（1回のみ）
pub async fn connect() -> Result<Docker> {
    let docker = Docker::connect_with_local_defaults()?;
    docker.ping().await?;
    Ok(docker)
}

/// エンジンが応答するまで上限付きで待機する
pub async fn wait_engine_ready(config: &WaitConfig) -> Result<Docker> {
    let mut last_error = String::new();

    for attempt in 0..config.max_retries {
        match connect().await {
            Ok(docker) => {
                tracing::debug!("コンテナエンジンに接続しました ({}回目)", attempt + 1);
                return Ok(docker);
            }
            Err(e) => {
                last_error = e.to_string();
                tracing::debug!("エンジン未応答 ({}回目): {}", attempt + 1, last_error);
            }
        }

        if attempt + 1 < config.max_retries {
            let delay_ms = config.delay_for_attempt(attempt);
            sleep(Duration::from_millis(delay_ms)).await;
        }
    }

    Err(ContainerError::EngineUnavailable {
        attempts: config.max_retries,
        message: last_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_wait_config_is_bounded() {
        let config = engine_wait_config();
        assert!(config.max_retries > 0);
        assert!(config.max_delay_ms >= config.initial_delay_ms);
    }
}
