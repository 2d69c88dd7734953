//! ボリューム定義

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// 名前付きボリュームのマウント定義
///
/// ボリュームの実体（作成・保持）はコンテナエンジン側が所有します。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeMount {
    /// 名前付きボリューム名
    pub volume: String,
    /// コンテナ内のマウント先
    pub target: PathBuf,
}

impl VolumeMount {
    pub fn new(volume: impl Into<String>, target: impl Into<PathBuf>) -> Self {
        Self {
            volume: volume.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for VolumeMount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.volume, self.target.display())
    }
}
