//! # UserRepository
//!
//! ユーザー情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **一意性は制約で保証**: ユーザー名の重複は INSERT 時の UNIQUE
//!   制約違反として検出し、[`InfraError::conflict`] に変換する。
//!   事前の SELECT による存在チェックは行わない（競合ウィンドウを作らないため）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use liftlog_domain::{
    password::PasswordHash,
    user::{User, UserId, Username},
};
use sqlx::PgPool;

use crate::error::InfraError;

/// ユーザーリポジトリトレイト
///
/// ユーザー情報の永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを作成する
    ///
    /// # 戻り値
    ///
    /// - `Ok(user)`: 採番済み ID を含む作成されたユーザー
    /// - `Err(_)`: ユーザー名が既存の場合は `Conflict`、その他はデータベースエラー
    async fn create(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<User, InfraError>;

    /// ID でユーザーを検索する
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(user))`: ユーザーが見つかった場合
    /// - `Ok(None)`: ユーザーが見つからない場合
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, InfraError>;

    /// ユーザー名でユーザーを検索する
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, InfraError>;
}

/// データベース行とドメインエンティティの変換用
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id:            i64,
    username:      String,
    password_hash: String,
    created_at:    DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, InfraError> {
        let username = Username::new(self.username)
            .map_err(|e| InfraError::unexpected(e.to_string()))?;

        Ok(User::from_db(
            UserId::from_i64(self.id),
            username,
            PasswordHash::new(self.password_hash),
            self.created_at,
        ))
    }
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn create(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<User, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username.as_str())
        .bind(password_hash.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                InfraError::conflict("User", username.as_str())
            }
            _ => InfraError::from(e),
        })?;

        row.into_user()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }
}
