//! # LiftLog 共有ユーティリティ
//!
//! このクレートは、LiftLog
//! プロジェクト全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 両サービス（user-service / workout-service）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 外部クレートへの依存は最小限に抑える
//!
//! ## モジュール構成
//!
//! - [`error_response`] - RFC 9457 Problem Details エラーレスポンス
//! - [`health`] - ヘルスチェック共通型
//! - [`observability`] - トレーシング初期化
//! - [`token`] - アクセストークンの発行・検証（共有秘密鍵は 1 箇所で管理）

pub mod error_response;
pub mod health;
pub mod observability;
pub mod token;

pub use error_response::ErrorResponse;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
pub use token::{Claims, TokenCodec, TokenError};
