//! # タスク API ハンドラ
//!
//! `/api/tasks` 配下のエンドポイントを実装する。
//!
//! ## エンドポイント
//!
//! | メソッド | パス | 説明 |
//! |----------|------|------|
//! | GET | `/api/tasks` | 全タスクを作成の新しい順で取得 |
//! | POST | `/api/tasks` | タスクを作成 |
//! | DELETE | `/api/tasks/{id}` | タスクを削除（冪等） |

use std::sync::Arc;

use axum::{
   Json,
   extract::{Path, State, rejection::JsonRejection},
   http::StatusCode,
   response::{IntoResponse, Response},
};
use preptrack_domain::task::{NewTask, TaskId};
use preptrack_infra::repository::TaskRepository;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// タスクハンドラーの State
pub struct TaskState<R> {
   pub repository: R,
}

/// タスク作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
   pub topic:       String,
   pub description: String,
   /// 省略時は `"Pending"` が補完される
   pub status:      Option<String>,
}

/// タスク作成レスポンス
#[derive(Debug, Serialize)]
pub struct TaskCreatedResponse {
   pub message: String,
   pub id:      TaskId,
}

/// 操作完了メッセージレスポンス
#[derive(Debug, Serialize)]
pub struct MessageResponse {
   pub message: String,
}

/// タスク一覧を取得する
///
/// ## エンドポイント
/// GET /api/tasks
///
/// id 降順（作成の新しい順）で全タスクを返す。タスクが存在しない
/// 場合は空配列を返す。
pub async fn list_tasks<R>(State(state): State<Arc<TaskState<R>>>) -> Result<Response, ApiError>
where
   R: TaskRepository,
{
   let tasks = state.repository.find_all().await?;

   Ok((StatusCode::OK, Json(tasks)).into_response())
}

/// タスクを作成する
///
/// ## エンドポイント
/// POST /api/tasks
///
/// 必須フィールド（`topic`, `description`）の欠落や JSON の構文エラーは
/// 400 を返す。`status` 省略時は `"Pending"` を補完して保存する。
/// id はストレージが採番し、レスポンスで返す。
pub async fn create_task<R>(
   State(state): State<Arc<TaskState<R>>>,
   body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
   R: TaskRepository,
{
   let Json(request) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

   let task = NewTask::new(request.topic, request.description, request.status);
   let id = state.repository.insert(&task).await?;

   let response = TaskCreatedResponse {
      message: "Task created".to_string(),
      id,
   };
   Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// タスクを削除する
///
/// ## エンドポイント
/// DELETE /api/tasks/{id}
///
/// 存在しない id でも成功を返す（冪等）。整数でない id セグメントは
/// ルーティング層のデフォルト応答に委ねる。
pub async fn delete_task<R>(
   State(state): State<Arc<TaskState<R>>>,
   Path(id): Path<i32>,
) -> Result<Response, ApiError>
where
   R: TaskRepository,
{
   state.repository.delete(TaskId::from_i32(id)).await?;

   let response = MessageResponse {
      message: "Task deleted".to_string(),
   };
   Ok((StatusCode::OK, Json(response)).into_response())
}

#[cfg(test)]
mod tests {
   use axum::{
      Router,
      body::Body,
      http::{Request, header},
      routing::{delete as delete_route, get},
   };
   use preptrack_infra::mock::MockTaskRepository;
   use pretty_assertions::assert_eq;
   use tower::ServiceExt;

   use super::*;

   fn test_app(repository: MockTaskRepository) -> Router {
      let state = Arc::new(TaskState { repository });
      Router::new()
         .route(
            "/api/tasks",
            get(list_tasks::<MockTaskRepository>).post(create_task::<MockTaskRepository>),
         )
         .route(
            "/api/tasks/{id}",
            delete_route(delete_task::<MockTaskRepository>),
         )
         .with_state(state)
   }

   async fn body_json(response: axum::response::Response) -> serde_json::Value {
      let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
         .await
         .unwrap();
      serde_json::from_slice(&bytes).unwrap()
   }

   fn post_json(body: &str) -> Request<Body> {
      Request::post("/api/tasks")
         .header(header::CONTENT_TYPE, "application/json")
         .body(Body::from(body.to_string()))
         .unwrap()
   }

   #[tokio::test]
   async fn test_空のストアでは一覧は空配列を返す() {
      let app = test_app(MockTaskRepository::new());

      let response = app
         .oneshot(Request::get("/api/tasks").body(Body::empty()).unwrap())
         .await
         .unwrap();

      assert_eq!(response.status(), StatusCode::OK);
      assert_eq!(body_json(response).await, serde_json::json!([]));
   }

   #[tokio::test]
   async fn test_作成は201と採番されたidを返す() {
      let app = test_app(MockTaskRepository::new());

      let response = app
         .oneshot(post_json(
            r#"{"topic":"Algebra","description":"Review chapter 3"}"#,
         ))
         .await
         .unwrap();

      assert_eq!(response.status(), StatusCode::CREATED);
      assert_eq!(
         body_json(response).await,
         serde_json::json!({
             "message": "Task created",
             "id": 1
         })
      );
   }

   #[tokio::test]
   async fn test_status省略時はpendingで保存される() {
      let app = test_app(MockTaskRepository::new());

      app.clone()
         .oneshot(post_json(
            r#"{"topic":"Algebra","description":"Review chapter 3"}"#,
         ))
         .await
         .unwrap();

      let response = app
         .oneshot(Request::get("/api/tasks").body(Body::empty()).unwrap())
         .await
         .unwrap();

      assert_eq!(
         body_json(response).await,
         serde_json::json!([{
             "id": 1,
             "topic": "Algebra",
             "description": "Review chapter 3",
             "status": "Pending"
         }])
      );
   }

   #[tokio::test]
   async fn test_status指定時はその値で保存される() {
      let app = test_app(MockTaskRepository::new());

      app.clone()
         .oneshot(post_json(
            r#"{"topic":"X","description":"Y","status":"Done"}"#,
         ))
         .await
         .unwrap();

      let response = app
         .oneshot(Request::get("/api/tasks").body(Body::empty()).unwrap())
         .await
         .unwrap();

      let json = body_json(response).await;
      assert_eq!(json[0]["topic"], "X");
      assert_eq!(json[0]["description"], "Y");
      assert_eq!(json[0]["status"], "Done");
      assert!(json[0]["id"].is_i64());
   }

   #[tokio::test]
   async fn test_一覧は作成の新しい順で返す() {
      let app = test_app(MockTaskRepository::new());

      for topic in ["A", "B", "C"] {
         app.clone()
            .oneshot(post_json(&format!(
               r#"{{"topic":"{topic}","description":"d"}}"#
            )))
            .await
            .unwrap();
      }

      let response = app
         .oneshot(Request::get("/api/tasks").body(Body::empty()).unwrap())
         .await
         .unwrap();

      let json = body_json(response).await;
      let topics: Vec<&str> = json
         .as_array()
         .unwrap()
         .iter()
         .map(|t| t["topic"].as_str().unwrap())
         .collect();
      assert_eq!(topics, vec!["C", "B", "A"]);
   }

   #[tokio::test]
   async fn test_必須フィールド欠落は400とエラーエンベロープを返す() {
      let app = test_app(MockTaskRepository::new());

      let response = app
         .oneshot(post_json(r#"{"topic":"Algebra"}"#))
         .await
         .unwrap();

      assert_eq!(response.status(), StatusCode::BAD_REQUEST);
      let json = body_json(response).await;
      assert!(json["error"].is_string());
   }

   #[tokio::test]
   async fn test_削除は冪等で2回とも成功メッセージを返す() {
      let app = test_app(MockTaskRepository::new());

      app.clone()
         .oneshot(post_json(r#"{"topic":"A","description":"d"}"#))
         .await
         .unwrap();

      for _ in 0..2 {
         let response = app
            .clone()
            .oneshot(
               Request::delete("/api/tasks/1")
                  .body(Body::empty())
                  .unwrap(),
            )
            .await
            .unwrap();

         assert_eq!(response.status(), StatusCode::OK);
         assert_eq!(
            body_json(response).await,
            serde_json::json!({ "message": "Task deleted" })
         );
      }

      let response = app
         .oneshot(Request::get("/api/tasks").body(Body::empty()).unwrap())
         .await
         .unwrap();
      assert_eq!(body_json(response).await, serde_json::json!([]));
   }

   #[tokio::test]
   async fn test_存在しないidの削除も成功を返す() {
      let app = test_app(MockTaskRepository::new());

      let response = app
         .oneshot(
            Request::delete("/api/tasks/999")
               .body(Body::empty())
               .unwrap(),
         )
         .await
         .unwrap();

      assert_eq!(response.status(), StatusCode::OK);
      assert_eq!(
         body_json(response).await,
         serde_json::json!({ "message": "Task deleted" })
      );
   }

   #[tokio::test]
   async fn test_ストレージ障害時は500とエラーエンベロープを返す() {
      let repository = MockTaskRepository::new();
      repository.fail_with("connection refused");
      let app = test_app(repository);

      let response = app
         .oneshot(Request::get("/api/tasks").body(Body::empty()).unwrap())
         .await
         .unwrap();

      assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
      let json = body_json(response).await;
      assert!(json["error"].as_str().unwrap().contains("connection refused"));
   }

   #[tokio::test]
   async fn test_整数でないidはルーティング層が4xxで応答する() {
      let app = test_app(MockTaskRepository::new());

      let response = app
         .oneshot(
            Request::delete("/api/tasks/abc")
               .body(Body::empty())
               .unwrap(),
         )
         .await
         .unwrap();

      assert!(response.status().is_client_error());
   }
}
