//! # ワークアウト
//!
//! ワークアウト（エクササイズ記録）エンティティと所有者モデルを定義する。
//!
//! ## 所有者モデル
//!
//! 所有者の結び付け方は 2 つの排他的な設計が存在する:
//!
//! - [`WorkoutOwner::UserId`] — 呼び出し元が数値のユーザー ID
//!   を直接指定する（登録時にユーザーディレクトリへ存在確認を行う運用）
//! - [`WorkoutOwner::Username`] — 検証済みベアラートークンの subject
//!   をそのまま所有者として刻印する運用
//!
//! どちらのモデルを使うかはワークアウトサービスの起動設定で決まり、
//! 1 つの稼働サービス内で混在することはない。

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{DomainError, user::{UserId, Username}};

/// ワークアウト ID（一意識別子）
///
/// データベースの BIGSERIAL で採番される数値 ID をラップする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct WorkoutId(i64);

impl WorkoutId {
    /// 既存の数値からワークアウト ID を作成する
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    /// 内部の数値を取得する
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// ワークアウトの所有者
///
/// 運用モードに応じてどちらか一方のみが使われる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkoutOwner {
    /// 数値のユーザー ID（directory モード）
    UserId(UserId),
    /// 検証済みトークンの subject（bearer モード）
    Username(Username),
}

/// 新規ワークアウト（永続化前）
///
/// ID 採番前のワークアウトを表現する。生成時にバリデーションを実行する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkout {
    name:   String,
    sets:   i32,
    reps:   i32,
    weight: i32,
    owner:  WorkoutOwner,
}

impl NewWorkout {
    /// 新規ワークアウトを作成する
    ///
    /// # バリデーション
    ///
    /// - `name` は空文字列ではない
    /// - `sets`・`reps` は 1 以上
    /// - `weight` は 0 以上
    pub fn new(
        name: impl Into<String>,
        sets: i32,
        reps: i32,
        weight: i32,
        owner: WorkoutOwner,
    ) -> Result<Self, DomainError> {
        let name = name.into();

        if name.is_empty() {
            return Err(DomainError::Validation(
                "ワークアウト名は必須です".to_string(),
            ));
        }

        if sets < 1 || reps < 1 {
            return Err(DomainError::Validation(
                "セット数・レップ数は1以上である必要があります".to_string(),
            ));
        }

        if weight < 0 {
            return Err(DomainError::Validation(
                "重量は0以上である必要があります".to_string(),
            ));
        }

        Ok(Self {
            name,
            sets,
            reps,
            weight,
            owner,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sets(&self) -> i32 {
        self.sets
    }

    pub fn reps(&self) -> i32 {
        self.reps
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }

    pub fn owner(&self) -> &WorkoutOwner {
        &self.owner
    }
}

/// ワークアウトエンティティ
///
/// 永続化済みのエクササイズ記録。更新・削除の操作は存在しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workout {
    id:         WorkoutId,
    name:       String,
    sets:       i32,
    reps:       i32,
    weight:     i32,
    owner:      WorkoutOwner,
    created_at: DateTime<Utc>,
}

impl Workout {
    /// 既存のデータからワークアウトを復元する（データベースから取得時）
    pub fn from_db(
        id: WorkoutId,
        name: String,
        sets: i32,
        reps: i32,
        weight: i32,
        owner: WorkoutOwner,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            sets,
            reps,
            weight,
            owner,
            created_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> WorkoutId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sets(&self) -> i32 {
        self.sets
    }

    pub fn reps(&self) -> i32 {
        self.reps
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }

    pub fn owner(&self) -> &WorkoutOwner {
        &self.owner
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
