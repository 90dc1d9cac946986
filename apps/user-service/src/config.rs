//! # User Service 設定
//!
//! 環境変数から User Service サーバーの設定を読み込む。

use std::env;

/// User Service サーバーの設定
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// データベース接続 URL
    pub database_url: String,
    /// トークン署名用の共有秘密鍵
    ///
    /// フォールバック値は持たない。未設定のまま起動させない。
    pub secret_key:   String,
}

impl UserServiceConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host:         env::var("USER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port:         env::var("USER_PORT")
                .expect("USER_PORT が設定されていません")
                .parse()
                .expect("USER_PORT は有効なポート番号である必要があります"),
            database_url: env::var("DATABASE_URL")
                .expect("DATABASE_URL が設定されていません"),
            secret_key:   env::var("SECRET_KEY")
                .expect("SECRET_KEY が設定されていません"),
        })
    }
}
