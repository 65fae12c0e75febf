//! # PrepTrack API サーバー
//!
//! 学習タスクを管理する CRUD API サーバー。
//!
//! ## 役割
//!
//! - **タスク管理**: 学習タスクの一覧取得・作成・削除
//! - **ヘルスチェック**: オーケストレーション層向けの死活確認
//!
//! ## アーキテクチャ
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   Frontend   │────▶│ PrepTrack API│────▶│  PostgreSQL  │
//! │              │     │  (port 5000) │     │ (study_tasks)│
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! リクエストごとに接続を 1 本確立し、SQL を 1 文実行して切断する。
//! 接続プールは使用しない。リクエスト間で共有する可変状態もない。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `DB_HOST` | No | PostgreSQL ホスト（デフォルト: `localhost`） |
//! | `DB_NAME` | No | データベース名（デフォルト: `preptrackdb`） |
//! | `DB_USER` | No | 接続ユーザー（デフォルト: `prepuser`） |
//! | `DB_PASS` | No | 接続パスワード（デフォルト: `SuperSecret123`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p preptrack-api
//!
//! # コンテナ環境（Secrets / ConfigMap から環境変数を注入）
//! DB_HOST=db.internal cargo run -p preptrack-api --release
//! ```

mod config;
mod error;
mod handler;

use std::{net::SocketAddr, sync::Arc};

use axum::{
   Router,
   routing::{delete, get},
};
use config::ApiConfig;
use handler::{HealthState, TaskState, create_task, delete_task, health_check, list_tasks};
use preptrack_infra::{db::PgConnectionProbe, repository::PostgresTaskRepository};
use tokio::net::TcpListener;
use tower_http::{
   cors::{Any, CorsLayer},
   trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// バインドアドレス（全インターフェース・固定ポート）
const BIND_ADDR: &str = "0.0.0.0:5000";

/// API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   // トレーシング初期化
   tracing_subscriber::registry()
      .with(
         tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,preptrack_api=debug,preptrack_infra=debug".into()),
      )
      .with(tracing_subscriber::fmt::layer())
      .init();

   // 設定読み込み（すべてデフォルト値を持つため失敗しない）
   let config = ApiConfig::from_env();

   tracing::info!("API サーバーを起動します: {}", BIND_ADDR);

   // 依存コンポーネントを初期化
   // 接続プールは作らない。各リポジトリが呼び出しごとに接続を確立する
   let task_state = Arc::new(TaskState {
      repository: PostgresTaskRepository::new(config.database.clone()),
   });
   let health_state = Arc::new(HealthState {
      probe: PgConnectionProbe::new(config.database),
   });

   // ルーター構築
   // フロントエンドは別オリジンから配信されるため、全オリジンを許可する
   let app = Router::new()
      .route("/health", get(health_check::<PgConnectionProbe>))
      .with_state(health_state)
      .route(
         "/api/tasks",
         get(list_tasks::<PostgresTaskRepository>).post(create_task::<PostgresTaskRepository>),
      )
      .route(
         "/api/tasks/{id}",
         delete(delete_task::<PostgresTaskRepository>),
      )
      .with_state(task_state)
      .layer(
         CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
      )
      .layer(TraceLayer::new_for_http());

   // サーバー起動
   let addr: SocketAddr = BIND_ADDR.parse().expect("アドレスのパースに失敗しました");

   let listener = TcpListener::bind(addr).await?;
   tracing::info!("API サーバーが起動しました: {}", addr);

   axum::serve(listener, app).await?;

   Ok(())
}
