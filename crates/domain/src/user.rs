//! # ユーザー
//!
//! ユーザーエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 要件 |
//! |---|------------|------|
//! | [`User`] | ユーザー | 登録時に作成され、以後更新・削除されない |
//! | [`Username`] | ユーザー名 | 全体で一意（ストレージ層の UNIQUE 制約で保証） |
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: UserId は数値 ID をラップし、型安全性を確保
//! - **不変性**: エンティティフィールドは不変
//! - **バリデーション**: 値オブジェクトの生成時に検証ロジックを実行

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{DomainError, password::PasswordHash};

/// ユーザー ID（一意識別子）
///
/// データベースの BIGSERIAL で採番される数値 ID をラップする。
/// Newtype パターンで型安全性を確保。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct UserId(i64);

impl UserId {
    /// 既存の数値からユーザー ID を作成する
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    /// 内部の数値を取得する
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// ユーザー名（値オブジェクト）
///
/// 生成時にバリデーションを実行し、不正な値の作成を防ぐ。
/// 一意性はここでは扱わない（ストレージ層の UNIQUE 制約の責務）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct Username(String);

impl Username {
    /// 最大文字数
    pub const MAX_LENGTH: usize = 64;

    /// ユーザー名を作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 空白文字を含まない
    /// - 最大 64 文字
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "ユーザー名は必須です".to_string(),
            ));
        }

        if value.chars().any(char::is_whitespace) {
            return Err(DomainError::Validation(
                "ユーザー名に空白文字は使用できません".to_string(),
            ));
        }

        if value.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::Validation(
                "ユーザー名は64文字以内である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

/// ユーザーエンティティ
///
/// システムのユーザーを表現する。登録時に作成され、
/// ユーザー名とパスワードハッシュを保持する。
///
/// # 不変条件
///
/// - `username` は全体で一意
/// - `password_hash` は外部に公開されない（公開ビューは ID とユーザー名のみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id:            UserId,
    username:      Username,
    password_hash: PasswordHash,
    created_at:    DateTime<Utc>,
}

impl User {
    /// 既存のデータからユーザーを復元する（データベースから取得時）
    pub fn from_db(
        id: UserId,
        username: Username,
        password_hash: PasswordHash,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            password_hash,
            created_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
