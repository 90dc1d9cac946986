//! # ユースケース層
//!
//! Workout Service のビジネスロジックを実装する。
//!
//! ## 所有権モードとユースケース
//!
//! 所有権モードごとに独立したユースケースを定義する。
//! 1 つの稼働サービスではどちらか一方のみが組み立てられ、
//! 2 つのモデルがコード上で混ざることはない。
//!
//! - [`DirectoryWorkoutUseCase`] — directory モード。所有者はリクエストの
//!   `user_id` で、User Service への存在確認で検証する
//! - [`BearerWorkoutUseCase`] — bearer モード。所有者は検証済み
//!   トークンの subject で、一覧は呼び出し元本人の記録に限定される

pub mod bearer;
pub mod directory;

pub use bearer::BearerWorkoutUseCaseImpl;
use async_trait::async_trait;
pub use directory::DirectoryWorkoutUseCaseImpl;
use liftlog_domain::workout::Workout;

use crate::error::WorkoutServiceError;

/// ワークアウト入力（所有者情報を除く共通フィールド）
#[derive(Debug, Clone)]
pub struct WorkoutInput {
    pub name:   String,
    pub sets:   i32,
    pub reps:   i32,
    pub weight: i32,
}

/// directory モードのワークアウトユースケース
#[async_trait]
pub trait DirectoryWorkoutUseCase: Send + Sync {
    /// ワークアウトを作成する
    ///
    /// 所有者の存在を User Service に確認してから保存する。
    ///
    /// # エラー
    ///
    /// - `OwnerNotFound`: ユーザー不在または存在確認先に到達不能
    /// - `Validation`: 入力値が不正な場合
    async fn create(
        &self,
        input: WorkoutInput,
        user_id: i64,
    ) -> Result<Workout, WorkoutServiceError>;

    /// 全ワークアウトを挿入順で取得する
    async fn list(&self) -> Result<Vec<Workout>, WorkoutServiceError>;
}

/// bearer モードのワークアウトユースケース
#[async_trait]
pub trait BearerWorkoutUseCase: Send + Sync {
    /// ワークアウトを作成する
    ///
    /// 所有者は検証済みトークンの subject から確定する。
    /// リクエスト側から所有者を指定する手段はない。
    ///
    /// # エラー
    ///
    /// - `Unauthenticated`: トークンが不正または期限切れの場合
    /// - `Validation`: 入力値が不正な場合
    async fn create(
        &self,
        token: &str,
        input: WorkoutInput,
    ) -> Result<Workout, WorkoutServiceError>;

    /// 呼び出し元本人のワークアウトを挿入順で取得する
    async fn list(&self, token: &str) -> Result<Vec<Workout>, WorkoutServiceError>;
}
