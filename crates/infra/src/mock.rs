//! # テスト用モック実装
//!
//! ハンドラテストで使用するインメモリのリポジトリとプローブ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! preptrack-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use preptrack_domain::task::{NewTask, Task, TaskId};

use crate::{db::ConnectionProbe, error::InfraError, repository::TaskRepository};

// ===== MockTaskRepository =====

/// インメモリ実装の TaskRepository
///
/// 実ストアと同じ観測可能な振る舞いを再現する:
///
/// - 挿入時に 1 から始まる連番 id を採番する
/// - 一覧は id 降順で返す
/// - 削除は冪等
///
/// [`fail_with`](MockTaskRepository::fail_with) でストレージ障害を
/// 注入でき、以後すべての操作がエラーを返す。
#[derive(Clone, Default)]
pub struct MockTaskRepository {
   tasks:   Arc<Mutex<Vec<Task>>>,
   next_id: Arc<Mutex<i32>>,
   failure: Arc<Mutex<Option<String>>>,
}

impl MockTaskRepository {
   pub fn new() -> Self {
      Self::default()
   }

   /// 以後のすべての操作を指定メッセージのエラーにする
   pub fn fail_with(&self, message: impl Into<String>) {
      *self.failure.lock().unwrap() = Some(message.into());
   }

   fn check_failure(&self) -> Result<(), InfraError> {
      match self.failure.lock().unwrap().as_ref() {
         Some(message) => Err(InfraError::Unexpected(message.clone())),
         None => Ok(()),
      }
   }
}

#[async_trait]
impl TaskRepository for MockTaskRepository {
   async fn find_all(&self) -> Result<Vec<Task>, InfraError> {
      self.check_failure()?;
      let mut tasks = self.tasks.lock().unwrap().clone();
      tasks.sort_by(|a, b| b.id.as_i32().cmp(&a.id.as_i32()));
      Ok(tasks)
   }

   async fn insert(&self, task: &NewTask) -> Result<TaskId, InfraError> {
      self.check_failure()?;
      let mut next_id = self.next_id.lock().unwrap();
      *next_id += 1;
      let id = TaskId::from_i32(*next_id);

      self.tasks.lock().unwrap().push(Task {
         id,
         topic: task.topic.clone(),
         description: task.description.clone(),
         status: task.status.clone(),
      });
      Ok(id)
   }

   async fn delete(&self, id: TaskId) -> Result<(), InfraError> {
      self.check_failure()?;
      self.tasks.lock().unwrap().retain(|t| t.id != id);
      Ok(())
   }
}

// ===== MockConnectionProbe =====

/// 常に成功、または注入された障害を返す ConnectionProbe
#[derive(Clone, Default)]
pub struct MockConnectionProbe {
   failure: Arc<Mutex<Option<String>>>,
}

impl MockConnectionProbe {
   pub fn new() -> Self {
      Self::default()
   }

   /// 以後のチェックを指定メッセージのエラーにする
   pub fn fail_with(&self, message: impl Into<String>) {
      *self.failure.lock().unwrap() = Some(message.into());
   }
}

#[async_trait]
impl ConnectionProbe for MockConnectionProbe {
   async fn check(&self) -> Result<(), InfraError> {
      match self.failure.lock().unwrap().as_ref() {
         Some(message) => Err(InfraError::Unexpected(message.clone())),
         None => Ok(()),
      }
   }
}
