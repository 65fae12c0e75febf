//! # PostgreSQL データベース接続管理
//!
//! リクエスト単位の接続確立と切断を行う。
//!
//! ## 設計方針
//!
//! - **接続プールなし**: 各リクエストが新しい接続を 1 本確立し、
//!   応答前に必ず手放す。接続がリクエストをまたいで再利用されることはない
//! - **設定の明示渡し**: [`DatabaseConfig`] を起動時に一度だけ構築し、
//!   ストレージアクセス層へ明示的に渡す。グローバル変数は持たない
//! - **sqlx 採用**: 非同期サポート、型安全な行マッピング
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
//! ## 使用例
//!
//! ```rust,ignore
//! use preptrack_infra::db::{self, DatabaseConfig};
//!
//! let config = DatabaseConfig::from_env();
//! let mut conn = db::connect(&config).await?;
//! ```

use std::env;

use async_trait::async_trait;
use sqlx::{ConnectOptions, Connection, PgConnection, postgres::PgConnectOptions};

use crate::error::InfraError;

/// データベース接続設定
///
/// プロセス起動時に一度だけ環境変数から構築し、以後変更しない。
/// 各リポジトリはこの設定のクローンを保持し、呼び出しごとに
/// 接続を確立する。
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
   /// PostgreSQL ホスト
   pub host:     String,
   /// データベース名
   pub name:     String,
   /// 接続ユーザー
   pub user:     String,
   /// 接続パスワード
   pub password: String,
}

impl DatabaseConfig {
   /// 環境変数から接続設定を読み込む
   ///
   /// すべての変数にデフォルト値があるため、この関数は失敗しない。
   /// デフォルトはローカル開発環境向けの値である。
   pub fn from_env() -> Self {
      Self {
         host:     env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
         name:     env::var("DB_NAME").unwrap_or_else(|_| "preptrackdb".to_string()),
         user:     env::var("DB_USER").unwrap_or_else(|_| "prepuser".to_string()),
         password: env::var("DB_PASS").unwrap_or_else(|_| "SuperSecret123".to_string()),
      }
   }

   fn connect_options(&self) -> PgConnectOptions {
      PgConnectOptions::new()
         .host(&self.host)
         .database(&self.name)
         .username(&self.user)
         .password(&self.password)
   }
}

/// 新しい接続を 1 本確立する
///
/// 返された接続の所有権は呼び出し側に移る。使用後は
/// [`Connection::close`] で切断するか、ドロップで破棄する
/// （どちらの経路でも接続はリークしない）。
pub async fn connect(config: &DatabaseConfig) -> Result<PgConnection, InfraError> {
   tracing::debug!(host = %config.host, database = %config.name, "データベースに接続します");
   Ok(config.connect_options().connect().await?)
}

/// ストアへの到達性を確認する
///
/// 接続を 1 本確立し、すぐに切断する。それ以外の操作は行わない。
pub async fn check_connection(config: &DatabaseConfig) -> Result<(), InfraError> {
   let conn = connect(config).await?;
   conn.close().await?;
   Ok(())
}

/// ストア到達性プローブ
///
/// ヘルスチェックハンドラが依存する接続確認の抽象化。
/// テストではスタブ実装に差し替えて障害を注入する。
#[async_trait]
pub trait ConnectionProbe: Send + Sync {
   /// 接続の確立と切断を試みる
   async fn check(&self) -> Result<(), InfraError>;
}

/// PostgreSQL への実接続で確認するプローブ
#[derive(Debug, Clone)]
pub struct PgConnectionProbe {
   config: DatabaseConfig,
}

impl PgConnectionProbe {
   /// 新しいプローブを作成する
   pub fn new(config: DatabaseConfig) -> Self {
      Self { config }
   }
}

#[async_trait]
impl ConnectionProbe for PgConnectionProbe {
   async fn check(&self) -> Result<(), InfraError> {
      check_connection(&self.config).await
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   fn assert_send_sync<T: Send + Sync>() {}

   #[test]
   fn test_pg_connection_probeはsendとsyncを実装している() {
      assert_send_sync::<PgConnectionProbe>();
   }

   #[test]
   fn test_connection_probe_traitはsendとsyncを実装している() {
      assert_send_sync::<Box<dyn ConnectionProbe>>();
   }

   #[test]
   fn test_connect_optionsに設定値が反映される() {
      let config = DatabaseConfig {
         host:     "localhost".to_string(),
         name:     "preptrackdb".to_string(),
         user:     "prepuser".to_string(),
         password: "SuperSecret123".to_string(),
      };
      let options = config.connect_options();

      assert_eq!(options.get_host(), "localhost");
      assert_eq!(options.get_database(), Some("preptrackdb"));
   }
}
