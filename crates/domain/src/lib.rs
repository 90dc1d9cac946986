//! # LiftLog ドメイン層
//!
//! ビジネスロジックの中核を担うドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（例: User, Workout）
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（例: Username,
//!   PasswordHash）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! apps → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、外部サービス）には一切依存しない。
//! これにより、ビジネスロジックの純粋性が保たれる。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`user`] - ユーザーエンティティと値オブジェクト
//! - [`workout`] - ワークアウトエンティティと所有者モデル
//! - [`password`] - パスワード関連の値オブジェクト

pub mod error;
pub mod password;
pub mod user;
pub mod workout;

pub use error::DomainError;
