//! # Workout Service サーバー
//!
//! ワークアウト（エクササイズ記録）の作成・一覧を担当する API サーバー。
//!
//! ## 役割
//!
//! - **ワークアウト作成**: 所有者を検証してエクササイズ記録を保存
//! - **ワークアウト一覧**: 挿入順の記録一覧を返す
//!
//! ## 所有権モード
//!
//! `OWNERSHIP_MODE` で所有権の扱いを選択する（起動時に確定）:
//!
//! - `directory`: ボディの `user_id` を受け取り、User Service への
//!   存在確認で検証する。一覧は全記録
//! - `bearer`（デフォルト）: Bearer トークンの subject を所有者として
//!   刻印する。一覧は本人の記録のみ
//!
//! ```text
//! ┌──────────────┐      ┌──────────────────┐      ┌──────────────┐
//! │   Client     │─────▶│ Workout Service  │─────▶│   Database   │
//! └──────────────┘      └──────────────────┘      └──────────────┘
//!                               │
//!                        存在確認（directory モードのみ）
//!                               ▼
//!                       ┌──────────────┐
//!                       │ User Service │
//!                       └──────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `WORKOUT_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `WORKOUT_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `SECRET_KEY` | **Yes** | トークン検証鍵（フォールバック値なし） |
//! | `OWNERSHIP_MODE` | No | `directory` / `bearer`（デフォルト: `bearer`） |
//! | `USER_SERVICE_URL` | directory モードのみ **Yes** | User Service のベース URL |
//!
//! ## 起動方法
//!
//! ```bash
//! WORKOUT_PORT=8001 DATABASE_URL=postgres://... SECRET_KEY=... \
//!     cargo run -p liftlog-workout-service
//! ```

mod client;
mod config;
mod error;
mod handler;
mod usecase;

use std::{net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use client::{HttpUserDirectoryClient, UserDirectoryClient};
use config::{OwnershipMode, WorkoutServiceConfig};
use handler::{
    BearerWorkoutState,
    DirectoryWorkoutState,
    ReadinessState,
    bearer_routes,
    directory_routes,
    health_check,
    readiness_check,
};
use liftlog_infra::{
    db,
    repository::{PostgresWorkoutRepository, WorkoutRepository},
};
use liftlog_shared::{
    TokenCodec,
    observability::{TracingConfig, make_request_span},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use usecase::{BearerWorkoutUseCaseImpl, DirectoryWorkoutUseCaseImpl};

/// Workout Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("workout-service");
    liftlog_shared::observability::init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "workout-service").entered();

    // 設定読み込み
    let config = WorkoutServiceConfig::from_env().expect("設定の読み込みに失敗しました");

    tracing::info!(
        mode = ?config.ownership_mode,
        "Workout Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("データベース接続に失敗しました");
    tracing::info!("データベースに接続しました");

    // マイグレーション実行
    db::run_migrations(&pool)
        .await
        .expect("マイグレーションの実行に失敗しました");
    tracing::info!("マイグレーションを適用しました");

    // Readiness Check 用 State（pool が move される前に clone）
    let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });

    // 依存コンポーネントを初期化
    let workout_repo: Arc<dyn WorkoutRepository> = Arc::new(PostgresWorkoutRepository::new(pool));

    // 所有権モードに応じたルーターを組み立てる
    let workout_routes = match config.ownership_mode {
        OwnershipMode::Directory => {
            let base_url = config
                .user_service_url
                .as_deref()
                .expect("directory モードでは USER_SERVICE_URL が設定されていません");
            let directory_client: Arc<dyn UserDirectoryClient> =
                Arc::new(HttpUserDirectoryClient::new(base_url));
            let usecase = DirectoryWorkoutUseCaseImpl::new(workout_repo, directory_client);

            directory_routes(Arc::new(DirectoryWorkoutState {
                usecase: Arc::new(usecase),
            }))
        }
        OwnershipMode::Bearer => {
            let token_codec = Arc::new(TokenCodec::new(&config.secret_key));
            let usecase = BearerWorkoutUseCaseImpl::new(workout_repo, token_codec);

            bearer_routes(Arc::new(BearerWorkoutState {
                usecase: Arc::new(usecase),
            }))
        }
    };

    // ルーター構築
    let app = Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .merge(workout_routes)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Workout Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
