//! # API エラーハンドリング
//!
//! HTTP API のエラー定義と、axum レスポンスへの変換を行う。
//!
//! ## 設計方針
//!
//! - **thiserror + IntoResponse**: 型安全なエラー定義と axum
//!   との統合による自動レスポンス変換
//! - **統一エンベロープ**: 失敗は `{"error": "<detail>"}` 形式で返す
//! - **原因の開示**: ストレージ障害は基底エラーのメッセージを
//!   そのままレスポンスボディに載せる契約（サーバーログにも出力する）
//!
//! ## エラーの階層
//!
//! ```text
//! インフラ層エラー (InfraError)
//!        ↓ #[from]
//! API エラー (ApiError)
//!        ↓ IntoResponse
//! HTTP レスポンス (StatusCode + JSON)
//! ```

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use preptrack_infra::InfraError;
use preptrack_shared::ErrorResponse;
use thiserror::Error;

/// API 層で発生するエラー
///
/// ハンドラから返されるエラー型。`IntoResponse` を実装しているため、
/// axum が自動的に HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum ApiError {
   /// 不正なリクエスト（400 Bad Request）
   ///
   /// 必須フィールドの欠落や JSON の構文エラーなど、
   /// リクエストボディが受理できない場合に使用。
   #[error("不正なリクエスト: {0}")]
   BadRequest(String),

   /// ストレージ障害（500 Internal Server Error）
   ///
   /// 接続確立の失敗と SQL 実行の失敗を区別せず、一律 500 で返す。
   /// `#[from]` により、リポジトリのエラーは `?` 演算子で変換される。
   #[error("ストレージ障害: {0}")]
   Storage(#[from] InfraError),
}

impl IntoResponse for ApiError {
   /// `ApiError` を axum の HTTP レスポンスに変換する
   ///
   /// | ApiError | HTTP Status |
   /// |----------|-------------|
   /// | BadRequest | 400 |
   /// | Storage | 500 |
   fn into_response(self) -> Response {
      let (status, detail) = match self {
         ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
         ApiError::Storage(e) => {
            tracing::error!("ストレージ障害: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
         }
      };

      (status, Json(ErrorResponse::new(detail))).into_response()
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   async fn body_json(response: Response) -> serde_json::Value {
      let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
         .await
         .unwrap();
      serde_json::from_slice(&bytes).unwrap()
   }

   #[tokio::test]
   async fn test_bad_requestは400とエラーエンベロープになる() {
      let response = ApiError::BadRequest("topic がありません".to_string()).into_response();

      assert_eq!(response.status(), StatusCode::BAD_REQUEST);
      let json = body_json(response).await;
      assert_eq!(json, serde_json::json!({ "error": "topic がありません" }));
   }

   #[tokio::test]
   async fn test_storageは500で基底エラーのメッセージを開示する() {
      let err = InfraError::Unexpected("connection refused".to_string());
      let response = ApiError::Storage(err).into_response();

      assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
      let json = body_json(response).await;
      assert!(
         json["error"]
            .as_str()
            .unwrap()
            .contains("connection refused")
      );
   }
}
