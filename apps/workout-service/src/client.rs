//! # 外部サービスクライアント
//!
//! Workout Service が依存する外部サービスへのクライアントを提供する。
//!
//! 現在の依存先は User Service のみ（directory モードの存在確認）。

pub mod user_directory;

pub use user_directory::{DirectoryError, HttpUserDirectoryClient, UserDirectoryClient};
