//! # WorkoutRepository
//!
//! ワークアウト記録の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **挿入順の保証**: 一覧取得は常に `ORDER BY id`（BIGSERIAL は単調増加）
//! - **所有者カラムは排他**: `user_id` / `owner_username` のどちらか一方のみを
//!   設定する（テーブルの CHECK 制約と対応）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use liftlog_domain::{
    user::{UserId, Username},
    workout::{NewWorkout, Workout, WorkoutId, WorkoutOwner},
};
use sqlx::PgPool;

use crate::error::InfraError;

/// ワークアウトリポジトリトレイト
#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// ワークアウトを作成する
    ///
    /// # 戻り値
    ///
    /// 採番済み ID を含む作成されたワークアウト。
    async fn create(&self, workout: &NewWorkout) -> Result<Workout, InfraError>;

    /// 全ワークアウトを挿入順で取得する（directory モードの一覧）
    async fn find_all(&self) -> Result<Vec<Workout>, InfraError>;

    /// 指定した所有者のワークアウトを挿入順で取得する（bearer モードの一覧）
    async fn find_by_owner(&self, owner: &Username) -> Result<Vec<Workout>, InfraError>;
}

/// データベース行とドメインエンティティの変換用
#[derive(Debug, sqlx::FromRow)]
struct WorkoutRow {
    id:             i64,
    name:           String,
    sets:           i32,
    reps:           i32,
    weight:         i32,
    user_id:        Option<i64>,
    owner_username: Option<String>,
    created_at:     DateTime<Utc>,
}

impl WorkoutRow {
    fn into_workout(self) -> Result<Workout, InfraError> {
        let owner = match (self.user_id, self.owner_username) {
            (Some(user_id), None) => WorkoutOwner::UserId(UserId::from_i64(user_id)),
            (None, Some(username)) => {
                let username = Username::new(username)
                    .map_err(|e| InfraError::unexpected(e.to_string()))?;
                WorkoutOwner::Username(username)
            }
            // CHECK 制約により到達しない
            _ => {
                return Err(InfraError::unexpected(format!(
                    "workout id={} の所有者カラムが不正です",
                    self.id
                )));
            }
        };

        Ok(Workout::from_db(
            WorkoutId::from_i64(self.id),
            self.name,
            self.sets,
            self.reps,
            self.weight,
            owner,
            self.created_at,
        ))
    }
}

/// PostgreSQL 実装の WorkoutRepository
#[derive(Debug, Clone)]
pub struct PostgresWorkoutRepository {
    pool: PgPool,
}

impl PostgresWorkoutRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkoutRepository for PostgresWorkoutRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn create(&self, workout: &NewWorkout) -> Result<Workout, InfraError> {
        let (user_id, owner_username) = match workout.owner() {
            WorkoutOwner::UserId(id) => (Some(id.as_i64()), None),
            WorkoutOwner::Username(username) => (None, Some(username.as_str())),
        };

        let row = sqlx::query_as::<_, WorkoutRow>(
            r#"
            INSERT INTO workouts (name, sets, reps, weight, user_id, owner_username)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, sets, reps, weight, user_id, owner_username, created_at
            "#,
        )
        .bind(workout.name())
        .bind(workout.sets())
        .bind(workout.reps())
        .bind(workout.weight())
        .bind(user_id)
        .bind(owner_username)
        .fetch_one(&self.pool)
        .await?;

        row.into_workout()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Workout>, InfraError> {
        let rows = sqlx::query_as::<_, WorkoutRow>(
            r#"
            SELECT id, name, sets, reps, weight, user_id, owner_username, created_at
            FROM workouts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(WorkoutRow::into_workout).collect()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_by_owner(&self, owner: &Username) -> Result<Vec<Workout>, InfraError> {
        let rows = sqlx::query_as::<_, WorkoutRow>(
            r#"
            SELECT id, name, sets, reps, weight, user_id, owner_username, created_at
            FROM workouts
            WHERE owner_username = $1
            ORDER BY id
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(WorkoutRow::into_workout).collect()
    }
}
