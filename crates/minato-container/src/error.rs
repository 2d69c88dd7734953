use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContainerError {
    #[error(
        "コンテナエンジンに接続できません: {0}\n\nヒント:\n  • Dockerが起動しているか確認してください\n  • OrbStackまたはDocker Desktopがインストールされているか確認してください"
    )]
    EngineConnectionFailed(String),

    #[error(
        "コンテナエンジンが応答しません（{attempts}回リトライ）\n最後のエラー: {message}\n\nヒント:\n  • Dockerデーモンの起動を待ってから再度お試しください"
    )]
    EngineUnavailable { attempts: u32, message: String },

    #[error(
        "docker コマンドが見つかりません\n\nヒント:\n  • Docker CLIがインストールされ、PATHに含まれているか確認してください\n  • compose プラグインが必要です: docker compose version"
    )]
    ComposeNotFound,

    #[error("compose コマンドが失敗しました:\n{stderr}")]
    ComposeFailed { stderr: String },

    #[error("Docker APIエラー: {0}")]
    DockerApiError(String),

    #[error(
        "エンドポイント '{url}' の準備完了を待機中にタイムアウトしました（{max_retries}回リトライ）\n\nヒント:\n  • 対象サービスのログを確認してください: docker logs <コンテナ名>\n  • --timeout で待機時間を延ばせます"
    )]
    ReadinessTimeout { url: String, max_retries: u32 },

    #[error("HTTPクライアントエラー: {0}")]
    HttpClient(String),

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<bollard::errors::Error> for ContainerError {
    fn from(err: bollard::errors::Error) -> Self {
        let err_str = err.to_string();
        if err_str.contains("Connection refused") || err_str.contains("No such file or directory") {
            ContainerError::EngineConnectionFailed(err_str)
        } else {
            ContainerError::DockerApiError(err_str)
        }
    }
}

pub type Result<T> = std::result::Result<T, ContainerError>;
