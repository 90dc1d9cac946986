//! # ユースケース層
//!
//! User Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: テスト可能性のためトレイトを定義
//! - **依存性注入**: リポジトリ・ハッシャー・トークンコーデックを外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約

pub mod account;

pub use account::AccountUseCaseImpl;
use async_trait::async_trait;
use liftlog_domain::user::User;

use crate::error::UserServiceError;

/// アカウントユースケーストレイト
///
/// User Service のビジネスロジックを定義する。
/// 具体的な実装は [`AccountUseCaseImpl`] で提供される。
#[async_trait]
pub trait AccountUseCase: Send + Sync {
    /// ユーザーを登録する
    ///
    /// パスワードをハッシュ化して保存する。
    ///
    /// # エラー
    ///
    /// - `DuplicateUsername`: ユーザー名が既存の場合
    /// - `Validation`: ユーザー名が不正な場合
    async fn register(&self, username: &str, password: &str) -> Result<User, UserServiceError>;

    /// ID でユーザーを取得する
    ///
    /// # エラー
    ///
    /// - `UserNotFound`: 指定した ID のユーザーが存在しない場合
    async fn get_user(&self, id: i64) -> Result<User, UserServiceError>;

    /// 認証してアクセストークンを発行する
    ///
    /// # エラー
    ///
    /// - `InvalidCredentials`: ユーザー不在またはパスワード不一致
    async fn authenticate(&self, username: &str, password: &str)
    -> Result<String, UserServiceError>;
}
