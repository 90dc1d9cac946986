//! # directory モードのユースケース実装
//!
//! 所有者をリクエストの `user_id` で受け取り、User Service への
//! 存在確認で検証する。
//!
//! ## フェイルクローズ
//!
//! 存在確認先に到達できない場合、ユーザーの存在を肯定できないため
//! 不在と同じ扱いで作成を拒否する。到達不能を「存在するとみなす」
//! 運用は、ディレクトリ停止中に任意の所有者で記録を作れてしまう。

use std::sync::Arc;

use async_trait::async_trait;
use liftlog_domain::{
    user::UserId,
    workout::{NewWorkout, Workout, WorkoutOwner},
};
use liftlog_infra::repository::WorkoutRepository;

use crate::{
    client::UserDirectoryClient,
    error::WorkoutServiceError,
    usecase::{DirectoryWorkoutUseCase, WorkoutInput},
};

/// directory モードのユースケース実装
pub struct DirectoryWorkoutUseCaseImpl {
    workout_repository: Arc<dyn WorkoutRepository>,
    directory_client:   Arc<dyn UserDirectoryClient>,
}

impl DirectoryWorkoutUseCaseImpl {
    pub fn new(
        workout_repository: Arc<dyn WorkoutRepository>,
        directory_client: Arc<dyn UserDirectoryClient>,
    ) -> Self {
        Self {
            workout_repository,
            directory_client,
        }
    }
}

#[async_trait]
impl DirectoryWorkoutUseCase for DirectoryWorkoutUseCaseImpl {
    #[tracing::instrument(skip_all, fields(user_id = user_id))]
    async fn create(
        &self,
        input: WorkoutInput,
        user_id: i64,
    ) -> Result<Workout, WorkoutServiceError> {
        // 存在確認。到達不能も不在と同じ扱い（フェイルクローズ）
        let exists = match self.directory_client.user_exists(user_id).await {
            Ok(exists) => exists,
            Err(e) => {
                tracing::warn!(error = %e, "存在確認に失敗したため作成を拒否します");
                false
            }
        };

        if !exists {
            return Err(WorkoutServiceError::OwnerNotFound { user_id });
        }

        let workout = NewWorkout::new(
            input.name,
            input.sets,
            input.reps,
            input.weight,
            WorkoutOwner::UserId(UserId::from_i64(user_id)),
        )?;

        let created = self.workout_repository.create(&workout).await?;

        tracing::info!(workout_id = %created.id(), "ワークアウトを作成しました");

        Ok(created)
    }

    #[tracing::instrument(skip_all)]
    async fn list(&self) -> Result<Vec<Workout>, WorkoutServiceError> {
        Ok(self.workout_repository.find_all().await?)
    }
}
