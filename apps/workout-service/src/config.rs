//! # Workout Service 設定
//!
//! 環境変数から Workout Service サーバーの設定を読み込む。
//!
//! ## 所有権モード
//!
//! `OWNERSHIP_MODE` で所有権の扱いを選択する。プロセスは
//! 起動から終了まで単一のモードで動作し、実行中の切り替えはない。
//!
//! - `directory`: 所有者をリクエストボディの `user_id` で受け取り、
//!   User Service への存在確認で検証する
//! - `bearer`（デフォルト）: 所有者を Bearer トークンの subject から確定する

use std::env;

/// 所有権モード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipMode {
    /// リクエストの `user_id` + User Service 存在確認
    Directory,
    /// Bearer トークンの subject を所有者として確定
    Bearer,
}

impl OwnershipMode {
    /// 文字列からモードをパースする
    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "directory" => Ok(Self::Directory),
            "bearer" => Ok(Self::Bearer),
            other => Err(format!(
                "OWNERSHIP_MODE は directory または bearer を指定してください: {other:?}"
            )),
        }
    }
}

/// Workout Service サーバーの設定
#[derive(Debug, Clone)]
pub struct WorkoutServiceConfig {
    /// バインドアドレス
    pub host:             String,
    /// ポート番号
    pub port:             u16,
    /// データベース接続 URL
    pub database_url:     String,
    /// トークン検証用の共有秘密鍵（bearer モードで使用）
    ///
    /// フォールバック値は持たない。未設定のまま起動させない。
    pub secret_key:       String,
    /// 所有権モード
    pub ownership_mode:   OwnershipMode,
    /// User Service のベース URL（directory モードで必須）
    pub user_service_url: Option<String>,
}

impl WorkoutServiceConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, env::VarError> {
        let ownership_mode = match env::var("OWNERSHIP_MODE") {
            Ok(val) => OwnershipMode::parse(&val)
                .expect("OWNERSHIP_MODE の値が不正です"),
            Err(_) => OwnershipMode::Bearer,
        };

        let user_service_url = env::var("USER_SERVICE_URL").ok();

        // directory モードでは存在確認先が必須
        if ownership_mode == OwnershipMode::Directory {
            user_service_url
                .as_ref()
                .expect("directory モードでは USER_SERVICE_URL が設定されていません");
        }

        Ok(Self {
            host: env::var("WORKOUT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("WORKOUT_PORT")
                .expect("WORKOUT_PORT が設定されていません")
                .parse()
                .expect("WORKOUT_PORT は有効なポート番号である必要があります"),
            database_url: env::var("DATABASE_URL")
                .expect("DATABASE_URL が設定されていません"),
            secret_key: env::var("SECRET_KEY")
                .expect("SECRET_KEY が設定されていません"),
            ownership_mode,
            user_service_url,
        })
    }
}
