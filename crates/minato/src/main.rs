mod commands;
mod provision;
mod shortcut;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "minato")]
#[command(about = "ローカルAIスタックを、ひとつのコマンドで。", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// スタックを起動（チェック → 生成 → 再作成 → 起動 → 到達性待機）
    Up {
        /// プロファイル名 (chat, automation)
        profile: Option<String>,
        /// プロファイル名 (-p/--profile フラグ、MINATO_PROFILE 環境変数)
        #[arg(
            short = 'p',
            long = "profile",
            env = "MINATO_PROFILE",
            conflicts_with = "profile",
            hide = true
        )]
        profile_flag: Option<String>,
        /// フロントエンドのデフォルトモデル
        #[arg(short, long)]
        model: Option<String>,
        /// Ollama APIのホスト側ポート
        #[arg(long, default_value_t = 11434)]
        ollama_port: u16,
        /// Web UIのホスト側ポート
        #[arg(long, default_value_t = 3000)]
        webui_port: u16,
        /// 到達性待機の上限（秒）
        #[arg(long, default_value_t = 120)]
        timeout: u64,
        /// 到達性待機をスキップする
        #[arg(long)]
        no_wait: bool,
        /// Web UIへのデスクトップショートカットを作成
        #[arg(long)]
        shortcut: bool,
    },
    /// スタックを停止・破棄
    Down {
        /// プロファイル名 (chat, automation)
        profile: Option<String>,
        /// プロファイル名 (-p/--profile フラグ、MINATO_PROFILE 環境変数)
        #[arg(
            short = 'p',
            long = "profile",
            env = "MINATO_PROFILE",
            conflicts_with = "profile",
            hide = true
        )]
        profile_flag: Option<String>,
        /// 名前付きボリュームも削除する（⚠️ モデル・チャット履歴も消えます）
        #[arg(long)]
        volumes: bool,
    },
    /// コンテナの状態を表示
    Ps {
        /// プロファイル名 (chat, automation)
        profile: Option<String>,
        /// プロファイル名 (-p/--profile フラグ、MINATO_PROFILE 環境変数)
        #[arg(
            short = 'p',
            long = "profile",
            env = "MINATO_PROFILE",
            conflicts_with = "profile",
            hide = true
        )]
        profile_flag: Option<String>,
    },
    /// マニフェストを表示・書き出し（エンジンには触れない）
    Render {
        /// プロファイル名 (chat, automation)
        profile: Option<String>,
        /// プロファイル名 (-p/--profile フラグ、MINATO_PROFILE 環境変数)
        #[arg(
            short = 'p',
            long = "profile",
            env = "MINATO_PROFILE",
            conflicts_with = "profile",
            hide = true
        )]
        profile_flag: Option<String>,
        /// フロントエンドのデフォルトモデル
        #[arg(short, long)]
        model: Option<String>,
        /// Ollama APIのホスト側ポート
        #[arg(long, default_value_t = 11434)]
        ollama_port: u16,
        /// Web UIのホスト側ポート
        #[arg(long, default_value_t = 3000)]
        webui_port: u16,
        /// 出力先ファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// バージョン情報を表示
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt::init();

    // Versionコマンドは何もロードしない
    if matches!(cli.command, Commands::Version) {
        println!("minato {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    match cli.command {
        Commands::Up {
            profile,
            profile_flag,
            model,
            ollama_port,
            webui_port,
            timeout,
            no_wait,
            shortcut,
        } => {
            let profile = commands::determine_profile(profile, profile_flag)?;
            let opts = minato_core::StackOptions {
                ollama_port,
                webui_port,
                default_model: model,
                ..Default::default()
            };
            commands::up::handle(profile, opts, timeout, no_wait, shortcut).await?;
        }
        Commands::Down {
            profile,
            profile_flag,
            volumes,
        } => {
            let profile = commands::determine_profile(profile, profile_flag)?;
            commands::down::handle(profile, volumes).await?;
        }
        Commands::Ps {
            profile,
            profile_flag,
        } => {
            let profile = commands::determine_profile(profile, profile_flag)?;
            commands::ps::handle(profile).await?;
        }
        Commands::Render {
            profile,
            profile_flag,
            model,
            ollama_port,
            webui_port,
            output,
        } => {
            let profile = commands::determine_profile(profile, profile_flag)?;
            let opts = minato_core::StackOptions {
                ollama_port,
                webui_port,
                default_model: model,
                ..Default::default()
            };
            commands::render::handle(profile, opts, output)?;
        }
        Commands::Version => {
            unreachable!("Version is handled before dispatch");
        }
    }

    Ok(())
}
