//! # アプリケーション設定
//!
//! 環境変数からアプリケーション設定を読み込む。
//!
//! ## 設計方針
//!
//! [12-Factor App](https://12factor.net/config) の原則に従い、
//! 接続パラメータを環境変数から読み込む。プロセス起動時に一度だけ
//! 構築し、以後変更しない。グローバル変数は持たず、ストレージアクセス層へ
//! 明示的に渡す。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `DB_HOST` | No | `localhost` | PostgreSQL ホスト |
//! | `DB_NAME` | No | `preptrackdb` | データベース名 |
//! | `DB_USER` | No | `prepuser` | 接続ユーザー |
//! | `DB_PASS` | No | `SuperSecret123` | 接続パスワード |
//!
//! リスニングアドレスは設定項目ではない（全インターフェース・固定ポート）。

use preptrack_infra::db::DatabaseConfig;

/// アプリケーション全体の設定
///
/// アプリケーション起動時に一度だけ構築し、各コンポーネントに渡す。
#[derive(Debug, Clone)]
pub struct ApiConfig {
   /// データベース接続設定
   pub database: DatabaseConfig,
}

impl ApiConfig {
   /// 環境変数から設定を読み込む
   ///
   /// すべての変数にデフォルト値があるため、この関数は失敗しない。
   pub fn from_env() -> Self {
      Self {
         database: DatabaseConfig::from_env(),
      }
   }
}
