//! # アカウントユースケース実装
//!
//! ユーザー登録・取得・認証のビジネスロジック。
//!
//! ## 設計方針
//!
//! - **タイミング攻撃対策**: ユーザーが存在しない場合もダミーハッシュの
//!   検証を行い、存在有無による応答時間の差を作らない
//! - **認証失敗の理由は区別しない**: ユーザー不在とパスワード不一致は
//!   どちらも `InvalidCredentials` に集約する

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use liftlog_domain::{
    password::PlainPassword,
    user::{User, UserId, Username},
};
use liftlog_infra::{PasswordHasher, repository::UserRepository};
use liftlog_shared::TokenCodec;

use crate::{error::UserServiceError, usecase::AccountUseCase};

/// ダミー検証用のハッシュ（タイミング攻撃対策）
///
/// ユーザーが存在しない場合でも Argon2 の検証コストを支払うために使用する。
const DUMMY_HASH: &str = "$argon2id$v=19$m=65536,t=1,p=1$olntqw+EoVpwH4B1vUAI0A$5yCA1izLODgz8nQOInDGwbuQB/AS0sIQDwpmIilve5M";

/// アカウントユースケースの実装
pub struct AccountUseCaseImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_codec:     Arc<TokenCodec>,
}

impl AccountUseCaseImpl {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            token_codec,
        }
    }

    /// ダミーのパスワード検証を実行する
    ///
    /// ユーザーが存在しない場合も検証コストを支払い、
    /// 応答時間からユーザーの存在有無を推測できないようにする。
    fn dummy_verification(&self, password: &PlainPassword) {
        let dummy_hash = liftlog_domain::password::PasswordHash::new(DUMMY_HASH);
        let _ = self.password_hasher.verify(password, &dummy_hash);
    }
}

#[async_trait]
impl AccountUseCase for AccountUseCaseImpl {
    #[tracing::instrument(skip_all, fields(username = %username))]
    async fn register(&self, username: &str, password: &str) -> Result<User, UserServiceError> {
        let username = Username::new(username)?;
        let password = PlainPassword::new(password);

        let password_hash = self.password_hasher.hash(&password)?;

        let user = self
            .user_repository
            .create(&username, &password_hash)
            .await
            .map_err(|e| {
                if e.as_conflict().is_some() {
                    UserServiceError::DuplicateUsername {
                        username: username.to_string(),
                    }
                } else {
                    UserServiceError::from(e)
                }
            })?;

        tracing::info!(user_id = %user.id(), "ユーザーを登録しました");

        Ok(user)
    }

    #[tracing::instrument(skip_all, fields(user_id = id))]
    async fn get_user(&self, id: i64) -> Result<User, UserServiceError> {
        self.user_repository
            .find_by_id(UserId::from_i64(id))
            .await?
            .ok_or(UserServiceError::UserNotFound { id })
    }

    #[tracing::instrument(skip_all, fields(username = %username))]
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<String, UserServiceError> {
        let password = PlainPassword::new(password);

        // ユーザー名が形式不正なら存在し得ないが、タイミング攻撃対策のため
        // ダミー検証を挟んでから認証失敗を返す
        let Ok(username) = Username::new(username) else {
            self.dummy_verification(&password);
            return Err(UserServiceError::InvalidCredentials);
        };

        let Some(user) = self.user_repository.find_by_username(&username).await? else {
            self.dummy_verification(&password);
            return Err(UserServiceError::InvalidCredentials);
        };

        let result = self
            .password_hasher
            .verify(&password, user.password_hash())?;

        if result.is_mismatch() {
            tracing::info!("パスワードが一致しませんでした");
            return Err(UserServiceError::InvalidCredentials);
        }

        let token = self
            .token_codec
            .issue(user.username().as_str(), Utc::now())
            .map_err(|e| UserServiceError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.id(), "アクセストークンを発行しました");

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use liftlog_domain::password::{PasswordHash, PasswordVerifyResult};
    use liftlog_infra::InfraError;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    /// テスト用スタブリポジトリ
    struct StubUserRepository {
        user:     Option<User>,
        conflict: bool,
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn create(
            &self,
            username: &Username,
            password_hash: &liftlog_domain::password::PasswordHash,
        ) -> Result<User, InfraError> {
            if self.conflict {
                return Err(InfraError::conflict("User", username.as_str()));
            }

            Ok(User::from_db(
                UserId::from_i64(1),
                username.clone(),
                password_hash.clone(),
                now(),
            ))
        }

        async fn find_by_id(&self, _id: UserId) -> Result<Option<User>, InfraError> {
            Ok(self.user.clone())
        }

        async fn find_by_username(
            &self,
            _username: &Username,
        ) -> Result<Option<User>, InfraError> {
            Ok(self.user.clone())
        }
    }

    /// テスト用スタブハッシャー（実際の Argon2 計算を避ける）
    struct StubPasswordHasher {
        matched: bool,
    }

    impl PasswordHasher for StubPasswordHasher {
        fn hash(&self, _password: &PlainPassword) -> Result<PasswordHash, InfraError> {
            Ok(PasswordHash::new("stub-hash"))
        }

        fn verify(
            &self,
            _password: &PlainPassword,
            _hash: &PasswordHash,
        ) -> Result<PasswordVerifyResult, InfraError> {
            Ok(PasswordVerifyResult::from(self.matched))
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn alice() -> User {
        User::from_db(
            UserId::from_i64(1),
            Username::new("alice").unwrap(),
            PasswordHash::new("stub-hash"),
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        )
    }

    fn usecase(
        user: Option<User>,
        conflict: bool,
        matched: bool,
    ) -> AccountUseCaseImpl {
        AccountUseCaseImpl::new(
            Arc::new(StubUserRepository { user, conflict }),
            Arc::new(StubPasswordHasher { matched }),
            Arc::new(TokenCodec::new("test-secret-key")),
        )
    }

    #[tokio::test]
    async fn test_register_ユーザーを登録できる() {
        let usecase = usecase(None, false, true);

        let user = usecase.register("alice", "password123").await.unwrap();

        assert_eq!(user.username().as_str(), "alice");
        assert_eq!(user.password_hash().as_str(), "stub-hash");
    }

    #[tokio::test]
    async fn test_register_重複ユーザー名はduplicate_usernameになる() {
        let usecase = usecase(None, true, true);

        let result = usecase.register("alice", "password123").await;

        assert!(matches!(
            result,
            Err(UserServiceError::DuplicateUsername { username }) if username == "alice"
        ));
    }

    #[rstest]
    #[case("", "空文字列")]
    #[case("user name", "空白を含む")]
    #[tokio::test]
    async fn test_register_不正なユーザー名はバリデーションエラー(
        #[case] username: &str,
        #[case] _reason: &str,
    ) {
        let usecase = usecase(None, false, true);

        let result = usecase.register(username, "password123").await;

        assert!(matches!(result, Err(UserServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_user_存在するユーザーを取得できる() {
        let usecase = usecase(Some(alice()), false, true);

        let user = usecase.get_user(1).await.unwrap();

        assert_eq!(user.username().as_str(), "alice");
    }

    #[tokio::test]
    async fn test_get_user_存在しないユーザーはnot_foundになる() {
        let usecase = usecase(None, false, true);

        let result = usecase.get_user(42).await;

        assert!(matches!(
            result,
            Err(UserServiceError::UserNotFound { id: 42 })
        ));
    }

    #[tokio::test]
    async fn test_authenticate_認証成功でトークンを発行する() {
        let usecase = usecase(Some(alice()), false, true);

        let token = usecase.authenticate("alice", "password123").await.unwrap();

        // 発行されたトークンは同じ秘密鍵で検証できる
        let codec = TokenCodec::new("test-secret-key");
        assert_eq!(codec.verify(&token).unwrap(), "alice");
    }

    #[tokio::test]
    async fn test_authenticate_ユーザー不在は認証失敗になる() {
        let usecase = usecase(None, false, true);

        let result = usecase.authenticate("alice", "password123").await;

        assert!(matches!(result, Err(UserServiceError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_パスワード不一致は認証失敗になる() {
        let usecase = usecase(Some(alice()), false, false);

        let result = usecase.authenticate("alice", "wrongpassword").await;

        assert!(matches!(result, Err(UserServiceError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_形式不正なユーザー名は認証失敗になる() {
        let usecase = usecase(None, false, true);

        let result = usecase.authenticate("user name", "password123").await;

        assert!(matches!(result, Err(UserServiceError::InvalidCredentials)));
    }
}
