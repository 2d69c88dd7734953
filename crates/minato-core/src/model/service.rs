//! サービス定義

use super::port::Port;
use super::volume::VolumeMount;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// サービス定義
///
/// スタックを構成する1コンテナ分の宣言。一度生成されたら不変で、
/// 実行のたびに丸ごと再生成されます（差分更新はしない）。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceSpec {
    /// サービス名（コンテナ名としてそのまま使用）
    pub name: String,
    /// イメージ参照（レジストリ到達性はここでは検証しない）
    pub image: String,
    #[serde(default)]
    pub ports: Vec<Port>,
    #[serde(default)]
    pub volumes: Vec<VolumeMount>,
    /// 環境変数（キー順で安定。k=v リストとして出力される）
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
    #[serde(default)]
    pub depends_on: Vec<Dependency>,
    /// 再起動ポリシー (no, always, on-failure, unless-stopped)
    #[serde(default)]
    pub restart: RestartPolicy,
    /// ヘルスチェック設定
    pub healthcheck: Option<HealthCheck>,
    /// 外部から観測可能な到達性エンドポイント
    pub readiness: Option<ReadinessProbe>,
}

impl ServiceSpec {
    /// マニフェストに書き込むイメージ参照を決定
    ///
    /// タグが含まれていない場合は ":latest" を補完します。
    pub fn image_ref(&self) -> String {
        let tail = self.image.rsplit('/').next().unwrap_or(&self.image);
        if tail.contains(':') {
            self.image.clone()
        } else {
            format!("{}:latest", self.image)
        }
    }
}

/// サービス間の依存関係
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependency {
    /// 依存先のサービス名
    pub service: String,
    /// trueなら依存先のヘルスチェック通過を起動前に要求する
    #[serde(default)]
    pub healthy: bool,
}

impl Dependency {
    pub fn on(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            healthy: false,
        }
    }

    pub fn on_healthy(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            healthy: true,
        }
    }
}

/// 再起動ポリシー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RestartPolicy {
    /// 再起動しない
    No,
    /// 常に再起動
    Always,
    /// 異常終了時のみ再起動
    OnFailure,
    /// 明示的に停止しない限り再起動（デフォルト）
    UnlessStopped,
}

impl Default for RestartPolicy {
    fn default() -> Self {
        Self::UnlessStopped
    }
}

impl RestartPolicy {
    /// マニフェストで使用する文字列に変換
    pub fn as_compose_str(&self) -> &'static str {
        match self {
            Self::No => "no",
            Self::Always => "always",
            Self::OnFailure => "on-failure",
            Self::UnlessStopped => "unless-stopped",
        }
    }
}

/// ヘルスチェック設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    /// テストコマンド (CMD-SHELL形式またはCMD形式)
    pub test: Vec<String>,
    /// チェック間隔（秒）
    #[serde(default = "default_interval")]
    pub interval: u64,
    /// タイムアウト（秒）
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// リトライ回数
    #[serde(default = "default_retries")]
    pub retries: u64,
    /// 起動待機時間（秒）
    #[serde(default = "default_start_period")]
    pub start_period: u64,
}

fn default_interval() -> u64 {
    5
}
fn default_timeout() -> u64 {
    3
}
fn default_retries() -> u64 {
    10
}
fn default_start_period() -> u64 {
    10
}

impl HealthCheck {
    /// シェルコマンド形式のヘルスチェックを作成
    pub fn cmd_shell(command: impl Into<String>) -> Self {
        Self {
            test: vec!["CMD-SHELL".to_string(), command.into()],
            interval: default_interval(),
            timeout: default_timeout(),
            retries: default_retries(),
            start_period: default_start_period(),
        }
    }
}

/// 到達性プローブ
///
/// サービスが起動を終えてリクエストを受け付けているかを判定する
/// HTTPチェック。成功ステータスが返れば準備完了とみなします。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessProbe {
    pub url: String,
}

impl ReadinessProbe {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_ref_appends_latest() {
        let service = ServiceSpec {
            name: "ollama".to_string(),
            image: "ollama/ollama".to_string(),
            ..Default::default()
        };
        assert_eq!(service.image_ref(), "ollama/ollama:latest");
    }

    #[test]
    fn test_image_ref_keeps_explicit_tag() {
        let service = ServiceSpec {
            name: "postgres".to_string(),
            image: "postgres:16-alpine".to_string(),
            ..Default::default()
        };
        assert_eq!(service.image_ref(), "postgres:16-alpine");
    }

    #[test]
    fn test_image_ref_with_registry_port() {
        // レジストリ部の ":" をタグと誤認しないこと
        let service = ServiceSpec {
            name: "app".to_string(),
            image: "localhost:5000/app".to_string(),
            ..Default::default()
        };
        assert_eq!(service.image_ref(), "localhost:5000/app:latest");
    }

    #[test]
    fn test_restart_policy_compose_str() {
        assert_eq!(RestartPolicy::UnlessStopped.as_compose_str(), "unless-stopped");
        assert_eq!(RestartPolicy::No.as_compose_str(), "no");
    }

    #[test]
    fn test_healthcheck_cmd_shell() {
        let hc = HealthCheck::cmd_shell("pg_isready -h localhost");
        assert_eq!(hc.test[0], "CMD-SHELL");
        assert_eq!(hc.test[1], "pg_isready -h localhost");
        assert_eq!(hc.interval, 5);
    }
}
