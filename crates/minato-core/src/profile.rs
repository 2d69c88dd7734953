//! ビルトインプロファイル
//!
//! 元々3種類に分裂していたセットアップ手順を、ひとつのワークフロー上の
//! 2プロファイルに統合しています。
//!
//! - `chat`: モデルランナー (ollama) + Webチャットフロントエンド (openwebui)
//! - `automation`: chat構成に加えて n8n / qdrant / postgres

use crate::error::{CoreError, Result};
use crate::model::{
    Dependency, HealthCheck, Port, ReadinessProbe, ServiceSpec, Stack, VolumeMount,
};
use crate::secrets;
use std::str::FromStr;

/// プロビジョニング対象のプロファイル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// ollama + openwebui
    Chat,
    /// ollama + openwebui + n8n + qdrant + postgres
    Automation,
}

impl FromStr for Profile {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "chat" => Ok(Self::Chat),
            "automation" => Ok(Self::Automation),
            other => Err(CoreError::UnknownProfile(other.to_string())),
        }
    }
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Automation => "automation",
        }
    }

    /// このプロファイルが管理するコンテナ名
    ///
    /// シークレット解決なしで参照できるため、down / ps で使用します。
    pub fn service_names(&self) -> &'static [&'static str] {
        match self {
            Self::Chat => &["ollama", "openwebui"],
            Self::Automation => &["postgres", "qdrant", "ollama", "n8n", "openwebui"],
        }
    }

    /// マニフェストのファイル名（設定ディレクトリ配下）
    pub fn manifest_file_name(&self) -> String {
        format!("{}.compose.yaml", self.as_str())
    }

    /// プロファイルからスタック定義を構築する
    ///
    /// automation は必須シークレットをここで解決します。
    /// 未設定があればコンテナに一切触れる前に失敗します。
    pub fn stack(&self, opts: &StackOptions) -> Result<Stack> {
        let mut services = match self {
            Self::Chat => vec![],
            Self::Automation => {
                let secrets = secrets::resolve(secrets::AUTOMATION_SECRETS)?;
                automation_services(opts, &secrets)
            }
        };

        services.push(ollama(opts));
        services.push(openwebui(opts));

        // 依存順に整列: 依存先が先に宣言される
        services.sort_by_key(|s| s.depends_on.len());

        let stack = Stack {
            name: format!("minato-{}", self.as_str()),
            network: "minato".to_string(),
            services,
        };
        stack.validate()?;
        Ok(stack)
    }
}

/// プロファイル共通の起動オプション
#[derive(Debug, Clone)]
pub struct StackOptions {
    /// Ollama APIのホスト側ポート
    pub ollama_port: u16,
    /// Webフロントエンドのホスト側ポート
    pub webui_port: u16,
    /// n8nのホスト側ポート
    pub n8n_port: u16,
    /// qdrantのホスト側ポート
    pub qdrant_port: u16,
    /// フロントエンドのデフォルトモデル
    pub default_model: Option<String>,
}

impl Default for StackOptions {
    fn default() -> Self {
        Self {
            ollama_port: 11434,
            webui_port: 3000,
            n8n_port: 5678,
            qdrant_port: 6333,
            default_model: None,
        }
    }
}

fn ollama(opts: &StackOptions) -> ServiceSpec {
    ServiceSpec {
        name: "ollama".to_string(),
        image: "ollama/ollama".to_string(),
        ports: vec![Port::new(opts.ollama_port, 11434)],
        volumes: vec![VolumeMount::new("ollama", "/root/.ollama")],
        readiness: Some(ReadinessProbe::new(format!(
            "http://localhost:{}/api/version",
            opts.ollama_port
        ))),
        ..Default::default()
    }
}

fn openwebui(opts: &StackOptions) -> ServiceSpec {
    let mut service = ServiceSpec {
        name: "openwebui".to_string(),
        image: "ghcr.io/open-webui/open-webui:main".to_string(),
        ports: vec![Port::new(opts.webui_port, 8080)],
        volumes: vec![VolumeMount::new("open-webui", "/app/backend/data")],
        depends_on: vec![Dependency::on("ollama")],
        readiness: Some(ReadinessProbe::new(format!(
            "http://localhost:{}/",
            opts.webui_port
        ))),
        ..Default::default()
    };

    service.environment.insert(
        "OLLAMA_BASE_URL".to_string(),
        "http://ollama:11434".to_string(),
    );
    if let Some(model) = &opts.default_model {
        service
            .environment
            .insert("DEFAULT_MODELS".to_string(), model.clone());
    }

    service
}

fn automation_services(
    opts: &StackOptions,
    secrets: &std::collections::BTreeMap<String, String>,
) -> Vec<ServiceSpec> {
    let user = &secrets["POSTGRES_USER"];
    let db = &secrets["POSTGRES_DB"];

    let mut postgres = ServiceSpec {
        name: "postgres".to_string(),
        image: "postgres:16-alpine".to_string(),
        // 公開ポートなし: postgresへはネットワーク内からのみ到達できる
        volumes: vec![VolumeMount::new("postgres", "/var/lib/postgresql/data")],
        healthcheck: Some(HealthCheck::cmd_shell(format!(
            "pg_isready -h localhost -U {} -d {}",
            user, db
        ))),
        ..Default::default()
    };
    for key in ["POSTGRES_USER", "POSTGRES_PASSWORD", "POSTGRES_DB"] {
        postgres
            .environment
            .insert(key.to_string(), secrets[key].clone());
    }

    let qdrant = ServiceSpec {
        name: "qdrant".to_string(),
        image: "qdrant/qdrant".to_string(),
        ports: vec![Port::new(opts.qdrant_port, 6333)],
        volumes: vec![VolumeMount::new("qdrant", "/qdrant/storage")],
        readiness: Some(ReadinessProbe::new(format!(
            "http://localhost:{}/readyz",
            opts.qdrant_port
        ))),
        ..Default::default()
    };

    let mut n8n = ServiceSpec {
        name: "n8n".to_string(),
        image: "docker.n8n.io/n8nio/n8n".to_string(),
        ports: vec![Port::new(opts.n8n_port, 5678)],
        volumes: vec![VolumeMount::new("n8n", "/home/node/.n8n")],
        // postgresのヘルスチェック通過を待ってから起動する
        depends_on: vec![Dependency::on_healthy("postgres")],
        readiness: Some(ReadinessProbe::new(format!(
            "http://localhost:{}/healthz",
            opts.n8n_port
        ))),
        ..Default::default()
    };
    let n8n_env = [
        ("DB_TYPE", "postgresdb".to_string()),
        ("DB_POSTGRESDB_HOST", "postgres".to_string()),
        ("DB_POSTGRESDB_PORT", "5432".to_string()),
        ("DB_POSTGRESDB_DATABASE", db.clone()),
        ("DB_POSTGRESDB_USER", user.clone()),
        (
            "DB_POSTGRESDB_PASSWORD",
            secrets["POSTGRES_PASSWORD"].clone(),
        ),
        ("N8N_ENCRYPTION_KEY", secrets["N8N_ENCRYPTION_KEY"].clone()),
        (
            "N8N_USER_MANAGEMENT_JWT_SECRET",
            secrets["N8N_USER_MANAGEMENT_JWT_SECRET"].clone(),
        ),
        ("OLLAMA_HOST", "ollama:11434".to_string()),
    ];
    for (key, value) in n8n_env {
        n8n.environment.insert(key.to_string(), value);
    }

    vec![postgres, qdrant, n8n]
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRETS: [(&str, Option<&str>); 5] = [
        ("POSTGRES_USER", Some("n8n")),
        ("POSTGRES_PASSWORD", Some("secret")),
        ("POSTGRES_DB", Some("n8n")),
        ("N8N_ENCRYPTION_KEY", Some("enc-key")),
        ("N8N_USER_MANAGEMENT_JWT_SECRET", Some("jwt-secret")),
    ];

    #[test]
    fn test_profile_from_str() {
        assert_eq!("chat".parse::<Profile>().unwrap(), Profile::Chat);
        assert_eq!(
            "automation".parse::<Profile>().unwrap(),
            Profile::Automation
        );
        assert!("prod".parse::<Profile>().is_err());
    }

    #[test]
    fn test_chat_stack() {
        let stack = Profile::Chat.stack(&StackOptions::default()).unwrap();

        assert_eq!(stack.services.len(), 2);
        let names = stack.service_names();
        assert!(names.contains(&"ollama"));
        assert!(names.contains(&"openwebui"));

        let webui = stack
            .services
            .iter()
            .find(|s| s.name == "openwebui")
            .unwrap();
        assert_eq!(
            webui.environment.get("OLLAMA_BASE_URL").unwrap(),
            "http://ollama:11434"
        );
        assert_eq!(webui.ports[0].to_string(), "3000:8080");
    }

    #[test]
    fn test_chat_stack_default_model() {
        let opts = StackOptions {
            default_model: Some("llama3.2".to_string()),
            ..Default::default()
        };
        let stack = Profile::Chat.stack(&opts).unwrap();
        let webui = stack
            .services
            .iter()
            .find(|s| s.name == "openwebui")
            .unwrap();
        assert_eq!(webui.environment.get("DEFAULT_MODELS").unwrap(), "llama3.2");
    }

    #[test]
    fn test_chat_readiness_endpoints() {
        let stack = Profile::Chat.stack(&StackOptions::default()).unwrap();
        let urls: Vec<&str> = stack
            .readiness_probes()
            .iter()
            .map(|p| p.url.as_str())
            .collect();
        assert!(urls.contains(&"http://localhost:11434/api/version"));
        assert!(urls.contains(&"http://localhost:3000/"));
    }

    #[test]
    fn test_automation_stack_requires_secrets() {
        temp_env::with_vars(
            [
                ("POSTGRES_USER", Some("n8n")),
                ("POSTGRES_PASSWORD", None::<&str>),
                ("POSTGRES_DB", Some("n8n")),
                ("N8N_ENCRYPTION_KEY", Some("k")),
                ("N8N_USER_MANAGEMENT_JWT_SECRET", Some("s")),
            ],
            || {
                let err = Profile::Automation
                    .stack(&StackOptions::default())
                    .unwrap_err();
                match err {
                    CoreError::MissingConfig { name } => assert_eq!(name, "POSTGRES_PASSWORD"),
                    other => panic!("unexpected error: {other}"),
                }
            },
        );
    }

    #[test]
    fn test_automation_stack_with_secrets() {
        temp_env::with_vars(TEST_SECRETS, || {
            let stack = Profile::Automation.stack(&StackOptions::default()).unwrap();

            assert_eq!(stack.services.len(), 5);

            let n8n = stack.services.iter().find(|s| s.name == "n8n").unwrap();
            assert!(n8n.depends_on.iter().any(|d| d.service == "postgres" && d.healthy));
            assert_eq!(
                n8n.environment.get("DB_POSTGRESDB_PASSWORD").unwrap(),
                "secret"
            );

            let postgres = stack
                .services
                .iter()
                .find(|s| s.name == "postgres")
                .unwrap();
            assert!(postgres.healthcheck.is_some());
            assert!(postgres.ports.is_empty());
        });
    }

    #[test]
    fn test_automation_dependency_order() {
        temp_env::with_vars(TEST_SECRETS, || {
            let stack = Profile::Automation.stack(&StackOptions::default()).unwrap();
            let names: Vec<&str> = stack.service_names();

            let postgres_pos = names.iter().position(|n| *n == "postgres").unwrap();
            let n8n_pos = names.iter().position(|n| *n == "n8n").unwrap();
            assert!(postgres_pos < n8n_pos);
        });
    }
}
