//! # ハンドラ層
//!
//! Workout Service の HTTP エンドポイントを定義する。
//!
//! ## エンドポイント一覧
//!
//! | メソッド | パス | 説明 |
//! |---------|------|------|
//! | POST | `/workouts/` | ワークアウト作成 |
//! | GET | `/workouts/` | ワークアウト一覧 |
//! | GET | `/health` | ヘルスチェック |
//! | GET | `/health/ready` | Readiness チェック |
//!
//! `/workouts/` の挙動は所有権モードで決まる。ルーターはモードごとに
//! [`workouts::directory_routes`] / [`workouts::bearer_routes`] で組み立てる。

pub mod health;
pub mod workouts;

pub use health::{ReadinessState, health_check, readiness_check};
pub use workouts::{
    BearerWorkoutState,
    DirectoryWorkoutState,
    bearer_routes,
    directory_routes,
};
