//! # ハンドラ層
//!
//! User Service の HTTP エンドポイントを定義する。
//!
//! ## エンドポイント一覧
//!
//! | メソッド | パス | 説明 |
//! |---------|------|------|
//! | POST | `/users/` | ユーザー登録 |
//! | GET | `/users/{id}` | ユーザー取得 |
//! | POST | `/token` | 認証・トークン発行 |
//! | GET | `/health` | ヘルスチェック |
//! | GET | `/health/ready` | Readiness チェック |

pub mod health;
pub mod token;
pub mod users;

use std::sync::Arc;

pub use health::{ReadinessState, health_check, readiness_check};
pub use token::login;
pub use users::{create_user, get_user};

use crate::usecase::AccountUseCase;

/// アカウント系ハンドラの共有状態
///
/// `/users/` と `/token` の両エンドポイントグループで共有する。
pub struct AccountState {
    pub usecase: Arc<dyn AccountUseCase>,
}
