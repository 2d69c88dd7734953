//! 既存コンテナのリセット
//!
//! 同名のコンテナが残っていると（実行中・停止中を問わず）composeの
//! 起動が名前衝突で失敗するため、起動前に停止・削除します。
//! この操作はトランザクショナルではありません: 起動が途中で失敗しても
//! ロールバックは行わず、実際に何が起動したかは到達性ポーリングと
//! 状態観測で判定します。

use crate::error::{ContainerError, Result};
use bollard::Docker;

/// 同名のコンテナが存在すれば停止して削除する
///
/// 「既に停止している」(304) は正常系として扱い、
/// 「存在しない」(404) は何もせず成功とみなします。
pub async fn remove_container_if_exists(docker: &Docker, name: &str) -> Result<()> {
    match docker
        .stop_container(name, None::<bollard::query_parameters::StopContainerOptions>)
        .await
    {
        Ok(_) => {
            tracing::debug!("コンテナを停止しました: {}", name);
        }
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 304, ..
        }) => {
            tracing::debug!("コンテナは既に停止しています: {}", name);
        }
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        }) => {
            // 存在しなければ削除も不要
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    match docker
        .remove_container(
            name,
            None::<bollard::query_parameters::RemoveContainerOptions>,
        )
        .await
    {
        Ok(_) => {
            tracing::debug!("コンテナを削除しました: {}", name);
            Ok(())
        }
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        }) => Ok(()),
        Err(e) => Err(ContainerError::DockerApiError(format!(
            "コンテナ '{}' の削除に失敗: {}",
            name, e
        ))),
    }
}

/// スタックの全コンテナを停止・削除する
pub async fn reset_containers(docker: &Docker, names: &[&str]) -> Result<()> {
    for name in names {
        remove_container_if_exists(docker, name).await?;
    }
    Ok(())
}
