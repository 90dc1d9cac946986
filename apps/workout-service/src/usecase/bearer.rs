//! # bearer モードのユースケース実装
//!
//! 所有者を検証済みトークンの subject から確定する。
//!
//! ## 設計方針
//!
//! - **所有者はサーバー側で刻印する**: リクエストボディに所有者を
//!   指定するフィールドはなく、改ざんの余地がない
//! - **一覧は本人の記録のみ**: 他ユーザーの記録は応答に含まれない

use std::sync::Arc;

use async_trait::async_trait;
use liftlog_domain::{
    user::Username,
    workout::{NewWorkout, Workout, WorkoutOwner},
};
use liftlog_infra::repository::WorkoutRepository;
use liftlog_shared::TokenCodec;

use crate::{
    error::WorkoutServiceError,
    usecase::{BearerWorkoutUseCase, WorkoutInput},
};

/// bearer モードのユースケース実装
pub struct BearerWorkoutUseCaseImpl {
    workout_repository: Arc<dyn WorkoutRepository>,
    token_codec:        Arc<TokenCodec>,
}

impl BearerWorkoutUseCaseImpl {
    pub fn new(workout_repository: Arc<dyn WorkoutRepository>, token_codec: Arc<TokenCodec>) -> Self {
        Self {
            workout_repository,
            token_codec,
        }
    }

    /// トークンを検証し、subject をユーザー名として返す
    ///
    /// 検証失敗（署名不一致・期限切れ）と subject の形式不正は
    /// どちらも `Unauthenticated` に集約する。
    fn verify_caller(&self, token: &str) -> Result<Username, WorkoutServiceError> {
        let subject = self.token_codec.verify(token).map_err(|e| {
            tracing::info!(error = %e, "トークン検証に失敗しました");
            WorkoutServiceError::Unauthenticated
        })?;

        Username::new(subject).map_err(|_| WorkoutServiceError::Unauthenticated)
    }
}

#[async_trait]
impl BearerWorkoutUseCase for BearerWorkoutUseCaseImpl {
    #[tracing::instrument(skip_all)]
    async fn create(
        &self,
        token: &str,
        input: WorkoutInput,
    ) -> Result<Workout, WorkoutServiceError> {
        let caller = self.verify_caller(token)?;

        let workout = NewWorkout::new(
            input.name,
            input.sets,
            input.reps,
            input.weight,
            WorkoutOwner::Username(caller),
        )?;

        let created = self.workout_repository.create(&workout).await?;

        tracing::info!(workout_id = %created.id(), "ワークアウトを作成しました");

        Ok(created)
    }

    #[tracing::instrument(skip_all)]
    async fn list(&self, token: &str) -> Result<Vec<Workout>, WorkoutServiceError> {
        let caller = self.verify_caller(token)?;

        Ok(self.workout_repository.find_by_owner(&caller).await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, Utc};
    use liftlog_domain::workout::WorkoutId;
    use liftlog_infra::InfraError;
    use liftlog_shared::token::DEFAULT_VALIDITY_MINUTES;
    use pretty_assertions::assert_eq;

    use super::*;

    const SECRET: &str = "test-secret-key";

    /// 所有者別に記録を保持するスタブリポジトリ
    struct StubWorkoutRepository {
        workouts: Vec<Workout>,
    }

    #[async_trait]
    impl WorkoutRepository for StubWorkoutRepository {
        async fn create(&self, workout: &NewWorkout) -> Result<Workout, InfraError> {
            Ok(Workout::from_db(
                WorkoutId::from_i64(1),
                workout.name().to_string(),
                workout.sets(),
                workout.reps(),
                workout.weight(),
                workout.owner().clone(),
                now(),
            ))
        }

        async fn find_all(&self) -> Result<Vec<Workout>, InfraError> {
            Ok(self.workouts.clone())
        }

        async fn find_by_owner(&self, owner: &Username) -> Result<Vec<Workout>, InfraError> {
            Ok(self
                .workouts
                .iter()
                .filter(|w| w.owner() == &WorkoutOwner::Username(owner.clone()))
                .cloned()
                .collect())
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn workout_of(name: &str, owner: &str) -> Workout {
        Workout::from_db(
            WorkoutId::from_i64(1),
            name.to_string(),
            5,
            5,
            100,
            WorkoutOwner::Username(Username::new(owner).unwrap()),
            now(),
        )
    }

    fn input() -> WorkoutInput {
        WorkoutInput {
            name:   "Squat".to_string(),
            sets:   5,
            reps:   5,
            weight: 100,
        }
    }

    fn usecase(workouts: Vec<Workout>) -> BearerWorkoutUseCaseImpl {
        BearerWorkoutUseCaseImpl::new(
            Arc::new(StubWorkoutRepository { workouts }),
            Arc::new(TokenCodec::new(SECRET)),
        )
    }

    fn token_for(subject: &str) -> String {
        TokenCodec::new(SECRET).issue(subject, Utc::now()).unwrap()
    }

    #[tokio::test]
    async fn test_create_トークンのsubjectが所有者として刻印される() {
        let usecase = usecase(vec![]);
        let token = token_for("alice");

        let workout = usecase.create(&token, input()).await.unwrap();

        assert_eq!(
            workout.owner(),
            &WorkoutOwner::Username(Username::new("alice").unwrap())
        );
    }

    #[tokio::test]
    async fn test_create_不正なトークンはunauthenticatedになる() {
        let usecase = usecase(vec![]);

        let result = usecase.create("not-a-token", input()).await;

        assert!(matches!(result, Err(WorkoutServiceError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_create_期限切れトークンはunauthenticatedになる() {
        let usecase = usecase(vec![]);
        let past = Utc::now() - Duration::minutes(DEFAULT_VALIDITY_MINUTES + 1);
        let expired = TokenCodec::new(SECRET).issue("alice", past).unwrap();

        let result = usecase.create(&expired, input()).await;

        assert!(matches!(result, Err(WorkoutServiceError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_create_別の秘密鍵で署名されたトークンはunauthenticatedになる() {
        let usecase = usecase(vec![]);
        let forged = TokenCodec::new("another-secret")
            .issue("alice", Utc::now())
            .unwrap();

        let result = usecase.create(&forged, input()).await;

        assert!(matches!(result, Err(WorkoutServiceError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_list_本人の記録のみを返す() {
        let usecase = usecase(vec![
            workout_of("Squat", "alice"),
            workout_of("Bench", "bob"),
        ]);

        let workouts = usecase.list(&token_for("alice")).await.unwrap();

        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].name(), "Squat");
    }

    #[tokio::test]
    async fn test_list_記録のないユーザーには空リストを返す() {
        let usecase = usecase(vec![workout_of("Squat", "alice")]);

        let workouts = usecase.list(&token_for("bob")).await.unwrap();

        assert!(workouts.is_empty());
    }
}
