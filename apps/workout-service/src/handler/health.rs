//! # ヘルスチェックハンドラ
//!
//! Workout Service の稼働状態を確認するためのエンドポイント。
//!
//! - `/health` — Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready` — Readiness Check（DB の接続状態を確認）
//!
//! User Service への到達性は Readiness に含めない。directory モードの
//! 存在確認失敗は作成時にフェイルクローズで扱われるため、
//! ディレクトリ停止がこのサービス自体の稼働可否を変えることはない。

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use liftlog_shared::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
use sqlx::PgPool;

/// Workout Service のヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness Check 用の State
pub struct ReadinessState {
    pub pool: PgPool,
}

/// Workout Service の Readiness Check エンドポイント
///
/// DB への接続を確認し、OK → 200、失敗 → 503 を返す。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let database = check_database(&state.pool).await;

    let mut checks = HashMap::new();
    checks.insert("database".to_string(), database.clone());

    let all_ok = matches!(database, CheckStatus::Ok);
    let status = if all_ok {
        ReadinessStatus::Ready
    } else {
        ReadinessStatus::NotReady
    };
    let http_status = if all_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (http_status, Json(ReadinessResponse { status, checks }))
}

/// DB への接続を `SELECT 1` で確認する（タイムアウト: 5 秒）
async fn check_database(pool: &PgPool) -> CheckStatus {
    match tokio::time::timeout(
        Duration::from_secs(5),
        sqlx::query("SELECT 1").execute(pool),
    )
    .await
    {
        Ok(Ok(_)) => CheckStatus::Ok,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "readiness check: database ping failed");
            CheckStatus::Error
        }
        Err(_) => {
            tracing::warn!("readiness check: database check timed out");
            CheckStatus::Error
        }
    }
}
