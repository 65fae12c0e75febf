//! # ヘルスチェックハンドラ
//!
//! サービスの稼働状態を確認するためのエンドポイント。
//!
//! ## 用途
//!
//! - **コンテナオーケストレーター**: Kubernetes / OpenShift の liveness probe
//! - **監視システム**: 外部監視サービスからの死活監視
//!
//! ## エンドポイント
//!
//! ```text
//! GET /health
//! ```
//!
//! ストアへの接続を 1 本確立してすぐ閉じることで、サービス自身の
//! 稼働とデータベースへの到達性をまとめて確認する。
//!
//! ## レスポンス例
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "database": "connected"
//! }
//! ```

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use preptrack_infra::db::ConnectionProbe;
use preptrack_shared::HealthResponse;

/// ヘルスチェック用の State
pub struct HealthState<P> {
   pub probe: P,
}

/// ヘルスチェックエンドポイント
///
/// プローブが成功すれば 200 / `"healthy"`、失敗すれば 500 /
/// `"unhealthy"` と原因メッセージを返す。接続の確立と切断以外の
/// 副作用はない。
pub async fn health_check<P>(
   State(state): State<Arc<HealthState<P>>>,
) -> (StatusCode, Json<HealthResponse>)
where
   P: ConnectionProbe,
{
   match state.probe.check().await {
      Ok(()) => (StatusCode::OK, Json(HealthResponse::healthy())),
      Err(e) => {
         tracing::warn!(error = %e, "ヘルスチェック失敗");
         (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(HealthResponse::unhealthy(e.to_string())),
         )
      }
   }
}
