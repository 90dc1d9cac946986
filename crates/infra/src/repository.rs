//! # リポジトリ実装
//!
//! ドメインエンティティの永続化を担当するリポジトリを提供する。
//!
//! ## 設計方針
//!
//! - **トレイトベース**: ユースケース層はトレイトに依存し、テストではスタブを注入
//! - **PostgreSQL 実装**: `Postgres` プレフィックスの構造体が具体実装
//! - **実行時バインド**: クエリは `sqlx::query_as` + `bind` で記述し、
//!   ビルド時にデータベース接続を要求しない

pub mod user_repository;
pub mod workout_repository;

pub use user_repository::{PostgresUserRepository, UserRepository};
pub use workout_repository::{PostgresWorkoutRepository, WorkoutRepository};
