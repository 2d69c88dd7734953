//! スタック定義

use super::service::{ReadinessProbe, ServiceSpec};
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Stack - ひとつのアプリケーションとして管理される
/// コンテナ・ネットワーク・ボリュームのまとまり
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stack {
    /// スタック名
    pub name: String,
    /// ブリッジネットワーク名
    pub network: String,
    /// 起動順（依存順）に並んだサービス
    pub services: Vec<ServiceSpec>,
}

impl Stack {
    /// スタック内の全サービス名（＝コンテナ名）
    pub fn service_names(&self) -> Vec<&str> {
        self.services.iter().map(|s| s.name.as_str()).collect()
    }

    /// スタックが参照する名前付きボリューム（重複排除・名前順）
    pub fn volume_names(&self) -> BTreeSet<&str> {
        self.services
            .iter()
            .flat_map(|s| s.volumes.iter().map(|v| v.volume.as_str()))
            .collect()
    }

    /// 宣言順の到達性エンドポイント
    pub fn readiness_probes(&self) -> Vec<&ReadinessProbe> {
        self.services
            .iter()
            .filter_map(|s| s.readiness.as_ref())
            .collect()
    }

    /// スタック定義の整合性を検証
    ///
    /// マニフェスト生成の前に必ず呼ばれます。コンテナエンジンに
    /// 渡してから失敗するより、ここで落とす方が分かりやすいため。
    pub fn validate(&self) -> Result<()> {
        let mut host_ports: HashMap<u16, &str> = HashMap::new();
        let names: BTreeSet<&str> = self.services.iter().map(|s| s.name.as_str()).collect();

        for service in &self.services {
            for port in &service.ports {
                if !port.is_valid() {
                    return Err(CoreError::InvalidPort {
                        service: service.name.clone(),
                        port: u32::from(port.host.min(port.container)),
                    });
                }
                // ホストポートはスタック全体で1回しか束縛できない
                // （同一サービス内の重複も不可）
                if let Some(first) = host_ports.insert(port.host, &service.name) {
                    return Err(CoreError::DuplicateHostPort {
                        port: port.host,
                        first: first.to_string(),
                        second: service.name.clone(),
                    });
                }
            }

            for dep in &service.depends_on {
                if !names.contains(dep.service.as_str()) {
                    return Err(CoreError::UnknownDependency {
                        service: service.name.clone(),
                        depends_on: dep.service.clone(),
                    });
                }
                if dep.healthy {
                    let target = self
                        .services
                        .iter()
                        .find(|s| s.name == dep.service)
                        .expect("dependency existence checked above");
                    if target.healthcheck.is_none() {
                        return Err(CoreError::MissingHealthcheck {
                            service: service.name.clone(),
                            depends_on: dep.service.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}
