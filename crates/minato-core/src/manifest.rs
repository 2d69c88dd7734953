//! Stack から宣言的マニフェスト（Compose形式）への変換
//!
//! 文字列テンプレートではなく型付き構造体をシリアライズすることで、
//! 変数置換によるインジェクションを構造的に防ぎます。
//! 同じ入力からは常にバイト単位で同一の出力が得られます。

use crate::error::Result;
use crate::model::{HealthCheck, ServiceSpec, Stack};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Compose形式のトップレベルドキュメント
#[derive(Debug, Serialize)]
struct ComposeFile {
    services: BTreeMap<String, ComposeService>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    networks: BTreeMap<String, ComposeNetwork>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    volumes: BTreeMap<String, ComposeVolume>,
}

#[derive(Debug, Serialize)]
struct ComposeService {
    image: String,
    container_name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ports: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    volumes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    environment: Vec<String>,
    networks: Vec<String>,
    restart: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    healthcheck: Option<ComposeHealthcheck>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    depends_on: BTreeMap<String, ComposeDependsOn>,
}

#[derive(Debug, Serialize)]
struct ComposeHealthcheck {
    test: Vec<String>,
    interval: String,
    timeout: String,
    retries: u64,
    start_period: String,
}

#[derive(Debug, Serialize)]
struct ComposeDependsOn {
    condition: String,
}

#[derive(Debug, Serialize)]
struct ComposeNetwork {
    driver: String,
}

#[derive(Debug, Serialize)]
struct ComposeVolume {
    driver: String,
}

/// スタックをマニフェスト文字列に変換（純粋関数）
///
/// 変換前に `Stack::validate()` で整合性を検証します。
pub fn render(stack: &Stack) -> Result<String> {
    stack.validate()?;

    let services: BTreeMap<String, ComposeService> = stack
        .services
        .iter()
        .map(|s| (s.name.clone(), to_compose_service(s, &stack.network)))
        .collect();

    let mut networks = BTreeMap::new();
    networks.insert(
        stack.network.clone(),
        ComposeNetwork {
            driver: "bridge".to_string(),
        },
    );

    let volumes: BTreeMap<String, ComposeVolume> = stack
        .volume_names()
        .into_iter()
        .map(|name| {
            (
                name.to_string(),
                ComposeVolume {
                    driver: "local".to_string(),
                },
            )
        })
        .collect();

    let file = ComposeFile {
        services,
        networks,
        volumes,
    };

    Ok(serde_yaml::to_string(&file)?)
}

/// マニフェストを指定パスへ書き込む
///
/// 既存ファイルは無条件に上書きします（バックアップなし）。
pub fn write_manifest(stack: &Stack, path: &Path) -> Result<()> {
    let text = render(stack)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, &text)?;

    tracing::debug!("マニフェストを書き込みました: {}", path.display());
    Ok(())
}

fn to_compose_service(service: &ServiceSpec, network: &str) -> ComposeService {
    let environment: Vec<String> = service
        .environment
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();

    let depends_on: BTreeMap<String, ComposeDependsOn> = service
        .depends_on
        .iter()
        .map(|dep| {
            let condition = if dep.healthy {
                "service_healthy"
            } else {
                "service_started"
            };
            (
                dep.service.clone(),
                ComposeDependsOn {
                    condition: condition.to_string(),
                },
            )
        })
        .collect();

    ComposeService {
        image: service.image_ref(),
        container_name: service.name.clone(),
        ports: service.ports.iter().map(|p| p.to_string()).collect(),
        volumes: service.volumes.iter().map(|v| v.to_string()).collect(),
        environment,
        networks: vec![network.to_string()],
        restart: service.restart.as_compose_str().to_string(),
        healthcheck: service.healthcheck.as_ref().map(to_compose_healthcheck),
        depends_on,
    }
}

fn to_compose_healthcheck(hc: &HealthCheck) -> ComposeHealthcheck {
    ComposeHealthcheck {
        test: hc.test.clone(),
        interval: format!("{}s", hc.interval),
        timeout: format!("{}s", hc.timeout),
        retries: hc.retries,
        start_period: format!("{}s", hc.start_period),
    }
}
