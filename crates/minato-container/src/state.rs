//! スタック状態の観測
//!
//! コンテナエンジンに問い合わせた瞬間のスナップショットであり、
//! このシステムは状態を一切永続化しません（永続化はエンジンと
//! ボリュームに委譲）。

use crate::error::Result;
use bollard::Docker;

/// コンテナの観測状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerState {
    Running,
    Stopped,
    Absent,
}

/// サービス1つ分の観測結果
#[derive(Debug, Clone)]
pub struct ServiceState {
    pub name: String,
    pub state: ContainerState,
    pub status: Option<String>,
    pub image: Option<String>,
    pub ports: Vec<String>,
}

/// スタック全体の観測結果
#[derive(Debug, Clone)]
pub struct StackState {
    pub services: Vec<ServiceState>,
}

impl StackState {
    pub fn all_running(&self) -> bool {
        self.services
            .iter()
            .all(|s| s.state == ContainerState::Running)
    }
}

/// 指定コンテナ名の現在状態を問い合わせる
pub async fn observe(docker: &Docker, names: &[&str]) -> Result<StackState> {
    let mut filters = std::collections::HashMap::new();
    filters.insert(
        "name".to_string(),
        names.iter().map(|n| n.to_string()).collect::<Vec<_>>(),
    );

    #[allow(deprecated)]
    let options = bollard::container::ListContainersOptions {
        all: true,
        filters,
        ..Default::default()
    };

    #[allow(deprecated)]
    let containers = docker.list_containers(Some(options)).await?;

    let services = names
        .iter()
        .map(|name| {
            // nameフィルタは部分一致のため、ここで完全一致に絞る
            let found = containers.iter().find(|c| {
                c.names
                    .as_ref()
                    .map(|list| {
                        list.iter()
                            .any(|n| n.trim_start_matches('/') == *name)
                    })
                    .unwrap_or(false)
            });

            match found {
                Some(container) => {
                    let status = container.status.clone();
                    let state = if status
                        .as_deref()
                        .map(|s| s.contains("Up"))
                        .unwrap_or(false)
                    {
                        ContainerState::Running
                    } else {
                        ContainerState::Stopped
                    };

                    let ports = container
                        .ports
                        .as_ref()
                        .map(|ports| {
                            ports
                                .iter()
                                .filter_map(|p| {
                                    p.public_port
                                        .map(|pub_port| format!("{}:{}", pub_port, p.private_port))
                                })
                                .collect()
                        })
                        .unwrap_or_default();

                    ServiceState {
                        name: name.to_string(),
                        state,
                        status,
                        image: container.image.clone(),
                        ports,
                    }
                }
                None => ServiceState {
                    name: name.to_string(),
                    state: ContainerState::Absent,
                    status: None,
                    image: None,
                    ports: Vec::new(),
                },
            }
        })
        .collect();

    Ok(StackState { services })
}
