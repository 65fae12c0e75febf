//! # ヘルスチェック共通型
//!
//! ヘルスチェックエンドポイントが返すレスポンス型を提供する。
//!
//! オーケストレーション層（Kubernetes / OpenShift の liveness probe）が
//! このレスポンスを解析してサービスの可用性を判断する。

use serde::{Deserialize, Serialize};

/// ヘルスチェックレスポンス
///
/// ストアに到達できた場合は `{"status":"healthy","database":"connected"}`、
/// 到達できなかった場合は `error` に原因メッセージを加えて返す。
/// 成功時に `error` フィールドは出力されない（null ではなく省略）。
///
/// ## 使用例
///
/// ```
/// use preptrack_shared::HealthResponse;
///
/// let response = HealthResponse::healthy();
/// assert_eq!(response.status, "healthy");
/// assert_eq!(response.database, "connected");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
   /// 稼働状態（`"healthy"` または `"unhealthy"`）
   pub status:   String,
   /// ストア接続状態（`"connected"` または `"disconnected"`）
   pub database: String,
   /// 接続失敗時の原因メッセージ
   #[serde(skip_serializing_if = "Option::is_none")]
   pub error:    Option<String>,
}

impl HealthResponse {
   /// ストア到達成功時のレスポンスを作成する
   pub fn healthy() -> Self {
      Self {
         status:   "healthy".to_string(),
         database: "connected".to_string(),
         error:    None,
      }
   }

   /// ストア到達失敗時のレスポンスを作成する
   pub fn unhealthy(error: impl Into<String>) -> Self {
      Self {
         status:   "unhealthy".to_string(),
         database: "disconnected".to_string(),
         error:    Some(error.into()),
      }
   }
}
