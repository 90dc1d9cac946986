//! # アクセストークン
//!
//! HMAC-SHA256（HS256）署名付きクレームセットの発行・検証を提供する。
//!
//! ## 設計
//!
//! - 秘密鍵の取り扱いはこのモジュールに集約する。user-service が発行し、
//!   workout-service（bearer モード）が検証するが、どちらも同じ
//!   [`TokenCodec`] を使う。検証ロジックをサービスごとに複製しない。
//! - クレームは subject（ユーザー名）と有効期限のみ。
//! - トークンはステートレスで、サーバー側の失効リストは持たない。

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm,
    DecodingKey,
    EncodingKey,
    Validation,
    decode,
    encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// デフォルトのトークン有効期間（分）
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// トークン操作で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// 有効期限切れ
    #[error("トークンの有効期限が切れています")]
    Expired,

    /// 署名不一致・形式不正
    #[error("トークンが不正です")]
    Invalid,

    /// 署名処理の失敗
    #[error("トークンの署名に失敗しました: {0}")]
    Signing(String),
}

/// トークンに埋め込むクレームセット
///
/// `sub` は subject（ユーザー名）、`exp` は Unix 秒の有効期限。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// subject — ユーザー名
    pub sub: String,
    /// 有効期限（Unix 秒）
    pub exp: i64,
}

/// アクセストークンの発行・検証を担当するコーデック
///
/// 共有秘密鍵から HS256 の鍵ペアを導出して保持する。
/// プロセス起動時に一度だけ構築し、以後は共有して使う。
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validity:     Duration,
}

impl TokenCodec {
    /// デフォルトの有効期間（30 分）でコーデックを作成する
    pub fn new(secret: &str) -> Self {
        Self::with_validity(secret, Duration::minutes(DEFAULT_VALIDITY_MINUTES))
    }

    /// 有効期間を指定してコーデックを作成する
    pub fn with_validity(secret: &str, validity: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validity,
        }
    }

    /// subject に対するトークンを発行する
    ///
    /// 有効期限は `now + validity`。`now` は呼び出し元から注入する。
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: subject.to_string(),
            exp: (now + self.validity).timestamp(),
        };

        encode(&jsonwebtoken::Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// トークンを検証し、subject を返す
    ///
    /// # エラー
    ///
    /// - [`TokenError::Expired`]: 有効期限切れ
    /// - [`TokenError::Invalid`]: 署名不一致、形式不正、`exp` クレーム欠落
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // 期限判定を決定的にするため leeway は持たない
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;

        Ok(data.claims.sub)
    }
}
