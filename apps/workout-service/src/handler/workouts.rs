//! # ワークアウトハンドラ
//!
//! ワークアウトの作成と一覧のエンドポイントを提供する。
//!
//! ## 所有権モードとルーター
//!
//! - [`directory_routes`] — 所有者はボディの `user_id`。作成時に
//!   User Service への存在確認が入る。一覧は全記録
//! - [`bearer_routes`] — 所有者は Bearer トークンの subject。
//!   一覧は呼び出し元本人の記録のみ
//!
//! 両モードのパスは同一（`POST /workouts/` / `GET /workouts/`）だが、
//! リクエスト形状と認可の意味が異なるため、ハンドラは共有しない。

use std::sync::Arc;

use axum::{
    Json,
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::IntoResponse,
    routing::post,
};
use liftlog_domain::workout::{Workout, WorkoutOwner};
use serde::{Deserialize, Serialize};

use crate::{
    error::WorkoutServiceError,
    usecase::{BearerWorkoutUseCase, DirectoryWorkoutUseCase, WorkoutInput},
};

// --- レスポンス型（両モード共通） ---

/// ワークアウトのレスポンス
///
/// 所有者フィールドはモードに応じてどちらか一方のみが出力される。
#[derive(Debug, Serialize)]
pub struct WorkoutResponse {
    pub id:             i64,
    pub name:           String,
    pub sets:           i32,
    pub reps:           i32,
    pub weight:         i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id:        Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_username: Option<String>,
}

impl From<Workout> for WorkoutResponse {
    fn from(workout: Workout) -> Self {
        let (user_id, owner_username) = match workout.owner() {
            WorkoutOwner::UserId(id) => (Some(id.as_i64()), None),
            WorkoutOwner::Username(username) => (None, Some(username.to_string())),
        };

        Self {
            id: workout.id().as_i64(),
            name: workout.name().to_string(),
            sets: workout.sets(),
            reps: workout.reps(),
            weight: workout.weight(),
            user_id,
            owner_username,
        }
    }
}

// --- directory モード ---

/// directory モードのハンドラ共有状態
pub struct DirectoryWorkoutState {
    pub usecase: Arc<dyn DirectoryWorkoutUseCase>,
}

/// directory モードの作成リクエスト
#[derive(Debug, Deserialize)]
pub struct DirectoryCreateRequest {
    pub name:    String,
    pub sets:    i32,
    pub reps:    i32,
    pub weight:  i32,
    pub user_id: i64,
}

/// POST /workouts/（directory モード）
///
/// 所有者の存在確認後にワークアウトを作成する。
pub async fn directory_create_workout(
    State(state): State<Arc<DirectoryWorkoutState>>,
    Json(req): Json<DirectoryCreateRequest>,
) -> Result<impl IntoResponse, WorkoutServiceError> {
    let input = WorkoutInput {
        name:   req.name,
        sets:   req.sets,
        reps:   req.reps,
        weight: req.weight,
    };

    let workout = state.usecase.create(input, req.user_id).await?;

    Ok((StatusCode::CREATED, Json(WorkoutResponse::from(workout))))
}

/// GET /workouts/（directory モード）
///
/// 全ワークアウトを挿入順で返す。
pub async fn directory_list_workouts(
    State(state): State<Arc<DirectoryWorkoutState>>,
) -> Result<impl IntoResponse, WorkoutServiceError> {
    let workouts = state.usecase.list().await?;

    Ok(Json(
        workouts
            .into_iter()
            .map(WorkoutResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// directory モードのルーターを組み立てる
pub fn directory_routes(state: Arc<DirectoryWorkoutState>) -> Router {
    Router::new()
        .route(
            "/workouts/",
            post(directory_create_workout).get(directory_list_workouts),
        )
        .with_state(state)
}

// --- bearer モード ---

/// bearer モードのハンドラ共有状態
pub struct BearerWorkoutState {
    pub usecase: Arc<dyn BearerWorkoutUseCase>,
}

/// bearer モードの作成リクエスト
///
/// 所有者を指定するフィールドは存在しない。
#[derive(Debug, Deserialize)]
pub struct BearerCreateRequest {
    pub name:   String,
    pub sets:   i32,
    pub reps:   i32,
    pub weight: i32,
}

/// `Authorization` ヘッダーから Bearer トークンを取り出す
///
/// ヘッダー欠落・形式不正はどちらも `Unauthenticated`。
fn bearer_token(headers: &HeaderMap) -> Result<&str, WorkoutServiceError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(WorkoutServiceError::Unauthenticated)
}

/// POST /workouts/（bearer モード）
///
/// 検証済みトークンの subject を所有者としてワークアウトを作成する。
pub async fn bearer_create_workout(
    State(state): State<Arc<BearerWorkoutState>>,
    headers: HeaderMap,
    Json(req): Json<BearerCreateRequest>,
) -> Result<impl IntoResponse, WorkoutServiceError> {
    let token = bearer_token(&headers)?;

    let input = WorkoutInput {
        name:   req.name,
        sets:   req.sets,
        reps:   req.reps,
        weight: req.weight,
    };

    let workout = state.usecase.create(token, input).await?;

    Ok((StatusCode::CREATED, Json(WorkoutResponse::from(workout))))
}

/// GET /workouts/（bearer モード）
///
/// 呼び出し元本人のワークアウトを挿入順で返す。
pub async fn bearer_list_workouts(
    State(state): State<Arc<BearerWorkoutState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, WorkoutServiceError> {
    let token = bearer_token(&headers)?;

    let workouts = state.usecase.list(token).await?;

    Ok(Json(
        workouts
            .into_iter()
            .map(WorkoutResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// bearer モードのルーターを組み立てる
pub fn bearer_routes(state: Arc<BearerWorkoutState>) -> Router {
    Router::new()
        .route(
            "/workouts/",
            post(bearer_create_workout).get(bearer_list_workouts),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Method, Request, header::WWW_AUTHENTICATE},
    };
    use chrono::DateTime;
    use liftlog_domain::{
        user::{UserId, Username},
        workout::WorkoutId,
    };
    use tower::ServiceExt;

    use super::*;

    fn squat_by_id(user_id: i64) -> Workout {
        Workout::from_db(
            WorkoutId::from_i64(1),
            "Squat".to_string(),
            5,
            5,
            100,
            WorkoutOwner::UserId(UserId::from_i64(user_id)),
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        )
    }

    fn squat_by_username(owner: &str) -> Workout {
        Workout::from_db(
            WorkoutId::from_i64(1),
            "Squat".to_string(),
            5,
            5,
            100,
            WorkoutOwner::Username(Username::new(owner).unwrap()),
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        )
    }

    // --- directory モードのテスト ---

    struct StubDirectoryUseCase {
        owner_exists: bool,
    }

    #[async_trait]
    impl DirectoryWorkoutUseCase for StubDirectoryUseCase {
        async fn create(
            &self,
            _input: WorkoutInput,
            user_id: i64,
        ) -> Result<Workout, WorkoutServiceError> {
            if self.owner_exists {
                Ok(squat_by_id(user_id))
            } else {
                Err(WorkoutServiceError::OwnerNotFound { user_id })
            }
        }

        async fn list(&self) -> Result<Vec<Workout>, WorkoutServiceError> {
            Ok(vec![squat_by_id(7)])
        }
    }

    fn directory_app(owner_exists: bool) -> Router {
        directory_routes(Arc::new(DirectoryWorkoutState {
            usecase: Arc::new(StubDirectoryUseCase { owner_exists }),
        }))
    }

    #[tokio::test]
    async fn test_directory_create_作成成功で201とuser_idを返す() {
        // Given
        let sut = directory_app(true);

        let body = serde_json::json!({
            "name": "Squat",
            "sets": 5,
            "reps": 5,
            "weight": 100,
            "user_id": 7
        });

        let request = Request::builder()
            .method(Method::POST)
            .uri("/workouts/")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["name"], "Squat");
        assert_eq!(json["user_id"], 7);
        assert!(json.get("owner_username").is_none());
    }

    #[tokio::test]
    async fn test_directory_create_所有者不在で404を返す() {
        // Given
        let sut = directory_app(false);

        let body = serde_json::json!({
            "name": "Squat",
            "sets": 5,
            "reps": 5,
            "weight": 100,
            "user_id": 42
        });

        let request = Request::builder()
            .method(Method::POST)
            .uri("/workouts/")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_directory_list_200と全記録を返す() {
        // Given
        let sut = directory_app(true);

        let request = Request::builder()
            .method(Method::GET)
            .uri("/workouts/")
            .body(Body::empty())
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json.as_array().unwrap().len(), 1);
    }

    // --- bearer モードのテスト ---

    struct StubBearerUseCase;

    #[async_trait]
    impl BearerWorkoutUseCase for StubBearerUseCase {
        async fn create(
            &self,
            token: &str,
            _input: WorkoutInput,
        ) -> Result<Workout, WorkoutServiceError> {
            if token == "valid-token" {
                Ok(squat_by_username("alice"))
            } else {
                Err(WorkoutServiceError::Unauthenticated)
            }
        }

        async fn list(&self, token: &str) -> Result<Vec<Workout>, WorkoutServiceError> {
            if token == "valid-token" {
                Ok(vec![squat_by_username("alice")])
            } else {
                Err(WorkoutServiceError::Unauthenticated)
            }
        }
    }

    fn bearer_app() -> Router {
        bearer_routes(Arc::new(BearerWorkoutState {
            usecase: Arc::new(StubBearerUseCase),
        }))
    }

    #[tokio::test]
    async fn test_bearer_create_作成成功で201とowner_usernameを返す() {
        // Given
        let sut = bearer_app();

        let body = serde_json::json!({
            "name": "Squat",
            "sets": 5,
            "reps": 5,
            "weight": 100
        });

        let request = Request::builder()
            .method(Method::POST)
            .uri("/workouts/")
            .header("content-type", "application/json")
            .header(AUTHORIZATION, "Bearer valid-token")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["owner_username"], "alice");
        assert!(json.get("user_id").is_none());
    }

    #[tokio::test]
    async fn test_bearer_create_ヘッダー欠落で401を返す() {
        // Given
        let sut = bearer_app();

        let body = serde_json::json!({
            "name": "Squat",
            "sets": 5,
            "reps": 5,
            "weight": 100
        });

        let request = Request::builder()
            .method(Method::POST)
            .uri("/workouts/")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[tokio::test]
    async fn test_bearer_create_bearer以外のスキームで401を返す() {
        // Given
        let sut = bearer_app();

        let body = serde_json::json!({
            "name": "Squat",
            "sets": 5,
            "reps": 5,
            "weight": 100
        });

        let request = Request::builder()
            .method(Method::POST)
            .uri("/workouts/")
            .header("content-type", "application/json")
            .header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bearer_list_200と本人の記録を返す() {
        // Given
        let sut = bearer_app();

        let request = Request::builder()
            .method(Method::GET)
            .uri("/workouts/")
            .header(AUTHORIZATION, "Bearer valid-token")
            .body(Body::empty())
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        let records = json.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["owner_username"], "alice");
    }

    #[tokio::test]
    async fn test_bearer_list_不正なトークンで401を返す() {
        // Given
        let sut = bearer_app();

        let request = Request::builder()
            .method(Method::GET)
            .uri("/workouts/")
            .header(AUTHORIZATION, "Bearer forged-token")
            .body(Body::empty())
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
