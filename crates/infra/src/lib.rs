//! # LiftLog インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理
//! - **リポジトリ実装**: ユーザー・ワークアウトの永続化
//! - **パスワードハッシュ**: Argon2id によるハッシュ化と検証
//!
//! ## 依存関係
//!
//! ```text
//! apps → infra → domain
//! ```
//!
//! インフラ層は `domain` に依存する。
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`password`] - Argon2id パスワードハッシュ
//! - [`repository`] - リポジトリ実装

pub mod db;
pub mod error;
pub mod password;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
pub use password::{Argon2PasswordHasher, PasswordHasher};
