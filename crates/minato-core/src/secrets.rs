//! 必須シークレットの解決
//!
//! 呼び出し元シェルの環境変数からDB認証情報や暗号化キーを取り込みます。
//! 未設定のまま空文字列をマニフェストへ流し込むのではなく、
//! コンテナに触れる前に `MissingConfig` で即座に失敗します。

use crate::error::{CoreError, Result};
use std::collections::BTreeMap;

/// automation プロファイルが要求する環境変数
pub const AUTOMATION_SECRETS: &[&str] = &[
    "POSTGRES_USER",
    "POSTGRES_PASSWORD",
    "POSTGRES_DB",
    "N8N_ENCRYPTION_KEY",
    "N8N_USER_MANAGEMENT_JWT_SECRET",
];

/// 指定キーをすべて環境から解決する
///
/// 未設定または空のキーがひとつでもあれば `MissingConfig`。
pub fn resolve(keys: &[&str]) -> Result<BTreeMap<String, String>> {
    let mut values = BTreeMap::new();

    for key in keys {
        match std::env::var(key) {
            Ok(value) if !value.trim().is_empty() => {
                values.insert((*key).to_string(), value);
            }
            _ => {
                return Err(CoreError::MissingConfig {
                    name: (*key).to_string(),
                });
            }
        }
    }

    Ok(values)
}
