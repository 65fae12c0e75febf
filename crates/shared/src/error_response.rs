//! # エラーレスポンス
//!
//! 全エンドポイント共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は api 層の責務（shared に axum 依存を入れない）
//! - ストレージ障害は原因メッセージをそのまま `error` に載せて返す契約

use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// すべてのエンドポイントは失敗時に `{"error": "<detail>"}` 形式の
/// JSON を返す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   pub error: String,
}

impl ErrorResponse {
   /// 新しい `ErrorResponse` を作成する
   pub fn new(detail: impl Into<String>) -> Self {
      Self {
         error: detail.into(),
      }
   }
}
