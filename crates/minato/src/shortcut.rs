//! デスクトップ統合（ショートカット作成）
//!
//! Webフロントエンドを開くランチャーファイルを書き出すだけの
//! 薄い便利機能。再実行時は同じパスを上書きします。

use minato_core::Result;
use std::path::{Path, PathBuf};

/// デフォルトのショートカット配置先
pub fn default_shortcut_path() -> Option<PathBuf> {
    dirs::desktop_dir().map(|dir| dir.join("minato-webui.desktop"))
}

/// 指定URLを開くショートカットを書き込む
pub fn install_shortcut(target_url: &str, destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(destination, desktop_entry(target_url))?;
    Ok(())
}

fn desktop_entry(url: &str) -> String {
    format!(
        "[Desktop Entry]\n\
         Type=Link\n\
         Name=Minato Web UI\n\
         URL={}\n\
         Icon=applications-internet\n",
        url
    )
}
