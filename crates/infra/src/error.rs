//! # インフラ層エラー定義
//!
//! データベースとの通信で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **エラーの変換**: `sqlx::Error` を `#[from]` でラップ
//! - **原因の保持**: `Display` が基底エラーのメッセージを含む。
//!   ストレージ障害はこのメッセージをそのまま HTTP レスポンスに
//!   載せて返す契約のため、情報を落とさない

use thiserror::Error;

/// インフラ層で発生するエラー
///
/// 接続確立の失敗と SQL 実行の失敗はどちらも [`InfraError::Database`]
/// に収束する。api 層でこのエラーを HTTP 500 レスポンスに変換する。
#[derive(Debug, Error)]
pub enum InfraError {
   /// データベースエラー
   ///
   /// 接続失敗、SQL クエリの実行失敗、型変換エラーなど。
   #[error("データベースエラー: {0}")]
   Database(#[from] sqlx::Error),

   /// 予期しないエラー
   ///
   /// データベース以外に起因する失敗。テストでの障害注入にも使用する。
   #[error("予期しないエラー: {0}")]
   Unexpected(String),
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_sqlx_errorからの変換でdatabaseバリアントになる() {
      let err: InfraError = sqlx::Error::RowNotFound.into();

      assert!(matches!(err, InfraError::Database(_)));
   }

   #[test]
   fn test_displayが基底エラーのメッセージを含む() {
      let err: InfraError = sqlx::Error::RowNotFound.into();

      assert!(err.to_string().contains("no rows returned"));
   }

   #[test]
   fn test_unexpectedのdisplayがメッセージを含む() {
      let err = InfraError::Unexpected("injected failure".to_string());

      assert_eq!(err.to_string(), "予期しないエラー: injected failure");
   }
}
