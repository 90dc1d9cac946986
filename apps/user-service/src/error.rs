//! # User Service エラー定義
//!
//! User Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## エラー分類とステータスコード
//!
//! | エラー | ステータス | 備考 |
//! |-------|-----------|------|
//! | `DuplicateUsername` | 400 | 分類は Conflict（公開契約に合わせて 400） |
//! | `UserNotFound` | 404 | |
//! | `InvalidCredentials` | 401 | `WWW-Authenticate: Bearer` を付与 |
//! | その他 | 500 | detail は固定値 |

use axum::{
    Json,
    http::{StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use liftlog_shared::ErrorResponse;
use thiserror::Error;

/// User Service で発生するエラー
#[derive(Debug, Error)]
pub enum UserServiceError {
    /// ユーザー名の重複
    #[error("ユーザー名は登録済みです: {username}")]
    DuplicateUsername {
        /// 衝突したユーザー名
        username: String,
    },

    /// ユーザーが見つからない
    #[error("ユーザーが見つかりません: {id}")]
    UserNotFound {
        /// 検索に使用した ID
        id: i64,
    },

    /// 認証失敗（ユーザー不在またはパスワード不一致）
    #[error("ユーザー名またはパスワードが正しくありません")]
    InvalidCredentials,

    /// 入力値の検証失敗
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// インフラ層エラー
    #[error("インフラエラー: {0}")]
    Infra(#[from] liftlog_infra::InfraError),

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl From<liftlog_domain::DomainError> for UserServiceError {
    fn from(e: liftlog_domain::DomainError) -> Self {
        UserServiceError::Validation(e.to_string())
    }
}

impl IntoResponse for UserServiceError {
    fn into_response(self) -> Response {
        let body = match &self {
            UserServiceError::DuplicateUsername { username } => {
                ErrorResponse::conflict(format!("ユーザー名は登録済みです: {username}"))
            }
            UserServiceError::UserNotFound { id } => {
                ErrorResponse::not_found(format!("ユーザーが見つかりません: {id}"))
            }
            UserServiceError::InvalidCredentials => {
                ErrorResponse::unauthorized("ユーザー名またはパスワードが正しくありません")
            }
            UserServiceError::Validation(msg) => ErrorResponse::bad_request(msg),
            UserServiceError::Infra(e) => {
                tracing::error!(error = %e, span_trace = %e.span_trace(), "インフラエラー");
                ErrorResponse::internal_error()
            }
            UserServiceError::Internal(msg) => {
                tracing::error!("内部エラー: {}", msg);
                ErrorResponse::internal_error()
            }
        };

        let status = StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // 401 には WWW-Authenticate ヘッダーを付与する
        if matches!(self, UserServiceError::InvalidCredentials) {
            (status, [(WWW_AUTHENTICATE, "Bearer")], Json(body)).into_response()
        } else {
            (status, Json(body)).into_response()
        }
    }
}
