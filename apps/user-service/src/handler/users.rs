//! # ユーザーハンドラ
//!
//! ユーザーの登録と取得のエンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `POST /users/` - ユーザー登録
//! - `GET /users/{id}` - ユーザー取得
//!
//! レスポンスにパスワードハッシュは含めない。公開ビューは
//! ID とユーザー名のみ。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use liftlog_domain::user::User;
use serde::{Deserialize, Serialize};

use crate::{error::UserServiceError, handler::AccountState};

// --- リクエスト/レスポンス型 ---

/// ユーザー登録リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
}

/// ユーザーの公開ビュー
///
/// パスワードハッシュを含まない。
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id:       i64,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id:       user.id().as_i64(),
            username: user.username().to_string(),
        }
    }
}

// --- ハンドラ ---

/// POST /users/
///
/// ユーザーを登録する。成功時は 201 と作成されたユーザーの公開ビューを返す。
pub async fn create_user(
    State(state): State<Arc<AccountState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, UserServiceError> {
    let user = state.usecase.register(&req.username, &req.password).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /users/{id}
///
/// ID でユーザーを取得する。
pub async fn get_user(
    State(state): State<Arc<AccountState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, UserServiceError> {
    let user = state.usecase.get_user(id).await?;

    Ok(Json(UserResponse::from(user)))
}
