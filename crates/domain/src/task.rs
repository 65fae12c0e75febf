//! # 学習タスク
//!
//! PrepTrack が管理する学習タスクのドメインモデル。
//!
//! ## 設計判断
//!
//! ### Newtype パターンの採用
//!
//! [`TaskId`] はストレージが採番する整数をラップした Newtype である。
//! これにより:
//!
//! - 型安全性: 生の `i32` とタスク ID をコンパイラが区別できる
//! - シリアライズ互換: JSON 上では素の整数として出力される
//!
//! ### status を自由テキストにする
//!
//! ステータスは呼び出し側が任意の文字列を指定できる契約であり、
//! 列挙型にはしない。省略時のみ [`DEFAULT_STATUS`] が補完される。
//!
//! ## 使用例
//!
//! ```rust
//! use preptrack_domain::task::{DEFAULT_STATUS, NewTask};
//!
//! // status 省略時はデフォルトが補完される
//! let task = NewTask::new("Algebra", "Review chapter 3", None);
//! assert_eq!(task.status, DEFAULT_STATUS);
//! ```

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// status 省略時に補完されるデフォルト値
pub const DEFAULT_STATUS: &str = "Pending";

/// 学習タスクの一意識別子
///
/// ストレージ層が挿入時に採番する auto-increment 整数。
/// 一度割り当てられた ID は不変で、再利用されない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct TaskId(i32);

impl TaskId {
   /// データベースから取得した整数からタスク ID を作成する
   pub fn from_i32(id: i32) -> Self {
      Self(id)
   }

   /// 内部の整数値を取得する
   ///
   /// SQL のバインドパラメータに渡す際に使用する。
   pub fn as_i32(&self) -> i32 {
      self.0
   }
}

/// 学習タスク
///
/// 永続化済みのタスク 1 件。すべてのフィールドが非 null であることを
/// ストレージ層のスキーマが保証する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
   /// ストレージが採番した識別子
   pub id:          TaskId,
   /// 学習トピック
   pub topic:       String,
   /// タスクの説明
   pub description: String,
   /// 進捗ステータス（自由テキスト）
   pub status:      String,
}

/// 新規作成する学習タスク
///
/// `id` は永続化時にストレージが採番するため持たない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
   pub topic:       String,
   pub description: String,
   pub status:      String,
}

impl NewTask {
   /// 新しいタスク入力を作成する
   ///
   /// `status` が `None` の場合は [`DEFAULT_STATUS`] を補完する。
   /// 指定された場合はその値をそのまま保持する（検証は行わない）。
   pub fn new(
      topic: impl Into<String>,
      description: impl Into<String>,
      status: Option<String>,
   ) -> Self {
      Self {
         topic:       topic.into(),
         description: description.into(),
         status:      status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
      }
   }
}
