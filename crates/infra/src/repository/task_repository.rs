//! # TaskRepository
//!
//! 学習タスクの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **1 操作 = 1 接続 = 1 文**: 各メソッドは接続を確立し、SQL を
//!   1 文だけ実行して切断する。トランザクションが複数文をまたぐことはない
//! - **コミット**: 変更系は PostgreSQL の autocommit に任せる
//! - **冪等な削除**: 存在しない id の削除もエラーにしない

use async_trait::async_trait;
use preptrack_domain::task::{NewTask, Task, TaskId};
use sqlx::Connection;

use crate::{
   db::{self, DatabaseConfig},
   error::InfraError,
};

/// タスクリポジトリトレイト
///
/// タスクの一覧取得・挿入・削除を定義する。更新操作はこの
/// インターフェースに存在しない。
#[async_trait]
pub trait TaskRepository: Send + Sync {
   /// 全タスクを id 降順（作成の新しい順）で取得する
   async fn find_all(&self) -> Result<Vec<Task>, InfraError>;

   /// タスクを挿入し、ストレージが採番した id を返す
   async fn insert(&self, task: &NewTask) -> Result<TaskId, InfraError>;

   /// id のタスクを削除する
   ///
   /// 対象行が存在しなくても成功として扱う（冪等）。
   async fn delete(&self, id: TaskId) -> Result<(), InfraError>;
}

/// 行マッピング用構造体
///
/// `study_tasks` テーブルの 1 行に対応する。
#[derive(sqlx::FromRow)]
struct TaskRow {
   id:          i32,
   topic:       String,
   description: String,
   status:      String,
}

impl From<TaskRow> for Task {
   fn from(row: TaskRow) -> Self {
      Self {
         id:          TaskId::from_i32(row.id),
         topic:       row.topic,
         description: row.description,
         status:      row.status,
      }
   }
}

/// PostgreSQL 実装の TaskRepository
///
/// 接続設定のクローンを保持し、呼び出しごとに接続を確立する。
/// 成功時は明示的に切断し、エラー時はドロップで接続を手放す。
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
   config: DatabaseConfig,
}

impl PostgresTaskRepository {
   /// 新しいリポジトリインスタンスを作成する
   pub fn new(config: DatabaseConfig) -> Self {
      Self { config }
   }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
   async fn find_all(&self) -> Result<Vec<Task>, InfraError> {
      let mut conn = db::connect(&self.config).await?;
      let rows = sqlx::query_as::<_, TaskRow>(
         "SELECT id, topic, description, status FROM study_tasks ORDER BY id DESC",
      )
      .fetch_all(&mut conn)
      .await?;
      conn.close().await?;

      Ok(rows.into_iter().map(Task::from).collect())
   }

   async fn insert(&self, task: &NewTask) -> Result<TaskId, InfraError> {
      let mut conn = db::connect(&self.config).await?;
      let id: i32 = sqlx::query_scalar(
         "INSERT INTO study_tasks (topic, description, status) VALUES ($1, $2, $3) RETURNING id",
      )
      .bind(&task.topic)
      .bind(&task.description)
      .bind(&task.status)
      .fetch_one(&mut conn)
      .await?;
      conn.close().await?;

      Ok(TaskId::from_i32(id))
   }

   async fn delete(&self, id: TaskId) -> Result<(), InfraError> {
      let mut conn = db::connect(&self.config).await?;
      sqlx::query("DELETE FROM study_tasks WHERE id = $1")
         .bind(id.as_i32())
         .execute(&mut conn)
         .await?;
      conn.close().await?;

      Ok(())
   }
}
