//! # User Directory クライアント
//!
//! User Service への存在確認を担当するクライアント。
//!
//! ## 設計方針
//!
//! - **存在有無とエラーを区別する**: 404 は「ユーザーが存在しない」という
//!   正常な回答であり、到達不能・タイムアウトとは別物として返す。
//!   フェイルクローズの判断（到達不能を不在と同様に扱う）は
//!   ユースケース層の責務とする
//! - **タイムアウト**: 応答のないディレクトリに引きずられないよう、
//!   リクエスト単位で 5 秒のタイムアウトを設定する

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

/// User Directory クライアントエラー
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// 到達不能（接続失敗・タイムアウト）
    #[error("ユーザーディレクトリに到達できません: {0}")]
    Unreachable(String),

    /// 予期しないステータスコード
    #[error("ユーザーディレクトリが予期しないステータスを返しました: {0}")]
    UnexpectedStatus(u16),
}

impl From<reqwest::Error> for DirectoryError {
    fn from(err: reqwest::Error) -> Self {
        DirectoryError::Unreachable(err.to_string())
    }
}

/// User Directory クライアントトレイト
///
/// directory モードのワークアウト作成時に、所有者として指定された
/// ユーザーの存在を確認する。
#[async_trait]
pub trait UserDirectoryClient: Send + Sync {
    /// 指定した ID のユーザーが存在するか確認する
    ///
    /// # 戻り値
    ///
    /// - `Ok(true)`: ユーザーが存在する
    /// - `Ok(false)`: ユーザーが存在しない（404）
    /// - `Err(_)`: 到達不能または予期しない応答
    async fn user_exists(&self, user_id: i64) -> Result<bool, DirectoryError>;
}

/// HTTP 実装の User Directory クライアント
#[derive(Clone)]
pub struct HttpUserDirectoryClient {
    base_url: String,
    client:   reqwest::Client,
}

impl HttpUserDirectoryClient {
    /// リクエスト単位のタイムアウト
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

    /// 新しいクライアントを作成する
    ///
    /// # 引数
    ///
    /// - `base_url`: User Service のベース URL（例: `http://localhost:8000`）
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client:   reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl UserDirectoryClient for HttpUserDirectoryClient {
    #[tracing::instrument(skip_all, fields(user_id = user_id))]
    async fn user_exists(&self, user_id: i64) -> Result<bool, DirectoryError> {
        let url = format!("{}/users/{}", self.base_url, user_id);

        let response = self
            .client
            .get(&url)
            .timeout(Self::REQUEST_TIMEOUT)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => {
                tracing::warn!(status = %status, "存在確認が予期しないステータスを返しました");
                Err(DirectoryError::UnexpectedStatus(status.as_u16()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_urlの末尾スラッシュは取り除かれる() {
        let client = HttpUserDirectoryClient::new("http://localhost:8000/");

        assert_eq!(client.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpUserDirectoryClient>();
        assert_send_sync::<Box<dyn UserDirectoryClient>>();
    }
}
