//! ポート定義

use serde::{Deserialize, Serialize};
use std::fmt;

/// 公開ポート定義（ホスト:コンテナ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub host: u16,
    pub container: u16,
}

impl Port {
    pub fn new(host: u16, container: u16) -> Self {
        Self { host, container }
    }

    /// 公開に使える有効なTCPポート番号か（0は予約値）
    pub fn is_valid(&self) -> bool {
        self.host != 0 && self.container != 0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.container)
    }
}
