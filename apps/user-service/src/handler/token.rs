//! # トークンハンドラ
//!
//! 認証とアクセストークン発行のエンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `POST /token` - フォームで受け取った認証情報を検証し、
//!   Bearer トークンを発行する
//!
//! リクエストはフォームエンコード（`application/x-www-form-urlencoded`）。
//! OAuth2 のパスワードフローと同じ形式を取る。

use std::sync::Arc;

use axum::{Form, Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::{error::UserServiceError, handler::AccountState};

/// トークン発行リクエスト（フォーム）
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// トークン発行レスポンス
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type:   String,
}

/// POST /token
///
/// 認証に成功した場合、Bearer トークンを返す。
/// 失敗した場合は 401 と `WWW-Authenticate` ヘッダーを返す。
pub async fn login(
    State(state): State<Arc<AccountState>>,
    Form(req): Form<TokenRequest>,
) -> Result<impl IntoResponse, UserServiceError> {
    let access_token = state
        .usecase
        .authenticate(&req.username, &req.password)
        .await?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
