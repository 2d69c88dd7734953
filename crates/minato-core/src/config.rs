//! 設定ディレクトリとマニフェスト配置

use crate::error::{CoreError, Result};
use crate::profile::Profile;
use std::path::PathBuf;

/// Minatoの設定ディレクトリを取得（なければ作成）
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or(CoreError::ConfigDirNotFound)?
        .join("minato");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// プロファイルのマニフェスト書き込み先
///
/// 固定パスへの無条件上書き運用。実行のたびに丸ごと再生成されるため、
/// 差分やバックアップは持ちません。
pub fn manifest_path(profile: Profile) -> Result<PathBuf> {
    Ok(get_config_dir()?.join(profile.manifest_file_name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_dir() {
        let result = get_config_dir();
        assert!(result.is_ok());

        let config_dir = result.unwrap();
        assert!(config_dir.ends_with("minato"));
        assert!(config_dir.exists());
    }

    #[test]
    fn test_manifest_path_per_profile() {
        let chat = manifest_path(Profile::Chat).unwrap();
        let automation = manifest_path(Profile::Automation).unwrap();

        assert!(chat.ends_with("chat.compose.yaml"));
        assert!(automation.ends_with("automation.compose.yaml"));
        assert_ne!(chat, automation);
    }
}
