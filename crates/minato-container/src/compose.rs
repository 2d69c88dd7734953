//! docker compose CLI wrapper
//!
//! 宣言的な「バックグラウンドで起動」操作はcomposeプラグインに委譲します。
//! 外部コマンド呼び出しは「コマンドが無い」「失敗した」「成功した」を
//! 区別して返し、終了コードを握り潰しません。

use crate::error::{ContainerError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// composeプラグイン呼び出しのラッパー
pub struct ComposeCli {
    manifest_path: PathBuf,
}

impl ComposeCli {
    pub fn new(manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
        }
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// スタックをバックグラウンドで起動
    pub async fn up(&self) -> Result<()> {
        self.run(&["up", "-d"]).await?;
        Ok(())
    }

    /// スタックを停止・破棄
    pub async fn down(&self, remove_volumes: bool) -> Result<()> {
        let mut args = vec!["down"];
        if remove_volumes {
            args.push("--volumes");
        }
        self.run(&args).await?;
        Ok(())
    }

    /// composeコマンドを実行してstdoutを返す
    async fn run(&self, args: &[&str]) -> Result<String> {
        let argv = compose_args(&self.manifest_path, args);

        let mut cmd = Command::new("docker");
        cmd.args(&argv);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Running: docker {}", args.join(" "));

        let output = match cmd.output().await {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ContainerError::ComposeNotFound);
            }
            Err(e) => return Err(e.into()),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ContainerError::ComposeFailed {
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// `docker` に渡す引数列を構築
fn compose_args(manifest_path: &Path, tail: &[&str]) -> Vec<OsString> {
    let mut argv: Vec<OsString> = vec!["compose".into(), "-f".into(), manifest_path.into()];
    argv.extend(tail.iter().map(OsString::from));
    argv
}
