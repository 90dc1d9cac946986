//! # Workout Service エラー定義
//!
//! Workout Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## エラー分類とステータスコード
//!
//! | エラー | ステータス | 備考 |
//! |-------|-----------|------|
//! | `OwnerNotFound` | 404 | 存在確認の失敗（到達不能を含む、フェイルクローズ） |
//! | `Unauthenticated` | 401 | `WWW-Authenticate: Bearer` を付与 |
//! | `Validation` | 400 | |
//! | その他 | 500 | detail は固定値 |

use axum::{
    Json,
    http::{StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use liftlog_shared::ErrorResponse;
use thiserror::Error;

/// Workout Service で発生するエラー
#[derive(Debug, Error)]
pub enum WorkoutServiceError {
    /// 所有者として指定されたユーザーが確認できない
    ///
    /// ユーザーが存在しない場合と、存在確認先に到達できない場合の
    /// 両方を含む（フェイルクローズ）。
    #[error("ユーザーが見つかりません: {user_id}")]
    OwnerNotFound {
        /// 確認できなかったユーザー ID
        user_id: i64,
    },

    /// 認証失敗（トークン欠落・不正・期限切れ）
    #[error("認証に失敗しました")]
    Unauthenticated,

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

impl From<liftlog_domain::DomainError> for WorkoutServiceError {
    fn from(e: liftlog_domain::DomainError) -> Self {
        WorkoutServiceError::Validation(e.to_string())
    }
}

impl IntoResponse for WorkoutServiceError {
    fn into_response(self) -> Response {
        let body = match &self {
            WorkoutServiceError::OwnerNotFound { user_id } => {
                ErrorResponse::not_found(format!("ユーザーが見つかりません: {user_id}"))
            }
            WorkoutServiceError::Unauthenticated => {
                ErrorResponse::unauthorized("認証に失敗しました")
            }
            WorkoutServiceError::Validation(msg) => ErrorResponse::bad_request(msg),
            WorkoutServiceError::Infra(e) => {
                tracing::error!(error = %e, span_trace = %e.span_trace(), "インフラエラー");
                ErrorResponse::internal_error()
            }
            WorkoutServiceError::Internal(msg) => {
                tracing::error!("内部エラー: {}", msg);
                ErrorResponse::internal_error()
            }
        };

        let status = StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // 401 には WWW-Authenticate ヘッダーを付与する
        if matches!(self, WorkoutServiceError::Unauthenticated) {
            (status, [(WWW_AUTHENTICATE, "Bearer")], Json(body)).into_response()
        } else {
            (status, Json(body)).into_response()
        }
    }
}
