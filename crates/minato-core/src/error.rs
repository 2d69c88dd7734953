use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error(
        "無効なポート番号です: サービス '{service}' のポート {port}\n\nヒント:\n  • 公開ポートは 1〜65535 の範囲で指定してください"
    )]
    InvalidPort { service: String, port: u32 },

    #[error(
        "ホストポート {port} が重複しています: '{first}' と '{second}'\n\nヒント:\n  • --ollama-port / --webui-port で別のポート番号を指定してください"
    )]
    DuplicateHostPort {
        port: u16,
        first: String,
        second: String,
    },

    #[error("サービス '{service}' が未定義のサービス '{depends_on}' に依存しています")]
    UnknownDependency { service: String, depends_on: String },

    #[error(
        "サービス '{service}' は '{depends_on}' のヘルス確認を要求していますが、'{depends_on}' に healthcheck が定義されていません"
    )]
    MissingHealthcheck { service: String, depends_on: String },

    #[error(
        "必須の環境変数 '{name}' が設定されていません\n\nヒント:\n  • export {name}=... を実行してから再度お試しください\n  • automation プロファイルはDB認証情報と暗号化キーを必要とします"
    )]
    MissingConfig { name: String },

    #[error("不明なプロファイルです: '{0}'\n利用可能: chat, automation")]
    UnknownProfile(String),

    #[error("設定ディレクトリが見つかりません")]
    ConfigDirNotFound,

    #[error("ファイル書き込みエラー: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("YAMLシリアライズエラー: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
