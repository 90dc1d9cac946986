//! # User Service サーバー
//!
//! ユーザーの登録・取得と認証トークン発行を担当する API サーバー。
//!
//! ## 役割
//!
//! - **ユーザー登録**: Argon2id でハッシュ化したパスワードと共にユーザーを保存
//! - **ユーザー取得**: ID による存在確認（workout-service からも参照される）
//! - **トークン発行**: パスワード認証に成功したユーザーへ Bearer トークンを発行
//!
//! ```text
//! ┌──────────────┐      ┌──────────────┐      ┌──────────────┐
//! │   Client     │─────▶│ User Service │─────▶│   Database   │
//! └──────────────┘      └──────────────┘      └──────────────┘
//!                              ▲
//!                       存在確認（GET /users/{id}）
//!                              │
//!                       ┌──────────────────┐
//!                       │ Workout Service  │
//!                       └──────────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `USER_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `USER_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `SECRET_KEY` | **Yes** | トークン署名鍵（フォールバック値なし） |
//!
//! ## 起動方法
//!
//! ```bash
//! USER_PORT=8000 DATABASE_URL=postgres://... SECRET_KEY=... \
//!     cargo run -p liftlog-user-service
//! ```

mod config;
mod error;
mod handler;
mod usecase;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use config::UserServiceConfig;
use handler::{
    AccountState,
    ReadinessState,
    create_user,
    get_user,
    health_check,
    login,
    readiness_check,
};
use liftlog_infra::{
    Argon2PasswordHasher,
    PasswordHasher,
    db,
    repository::{PostgresUserRepository, UserRepository},
};
use liftlog_shared::{
    TokenCodec,
    observability::{TracingConfig, make_request_span},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use usecase::AccountUseCaseImpl;

/// User Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("user-service");
    liftlog_shared::observability::init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "user-service").entered();

    // 設定読み込み
    let config = UserServiceConfig::from_env().expect("設定の読み込みに失敗しました");

    tracing::info!(
        "User Service サーバーを起動します: {}:{}",
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
    let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool));
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let token_codec = Arc::new(TokenCodec::new(&config.secret_key));
    let account_usecase = AccountUseCaseImpl::new(user_repo, password_hasher, token_codec);
    let account_state = Arc::new(AccountState {
        usecase: Arc::new(account_usecase),
    });

    // ルーター構築
    let app = Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .route("/users/", post(create_user))
        .route("/users/{id}", get(get_user))
        .route("/token", post(login))
        .with_state(account_state)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("User Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
