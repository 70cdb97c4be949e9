//! Repository Module
//!
//! Provides CRUD operations for the `employee` and `task` tables.

pub mod employee;
pub mod task;

// Re-exports
pub use employee::{EmployeeQuery, EmployeeRepository, SortField, SortOrder};
pub use task::{MonthlyFilter, TaskRepository};

use serde::Serialize;
use serde_json::{Map, Value};
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let message = err.to_string();
        if is_unique_violation(&message) {
            RepoError::Duplicate(message)
        } else {
            RepoError::Database(message)
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Duplicate(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Unique index violations read "Database index `x` already contains ..."
fn is_unique_violation(message: &str) -> bool {
    message.contains("index") && message.contains("already contains")
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention
// =============================================================================
//
// 对外 ID 为 32 位十六进制字符串 (shared::util::new_record_id)，
// 库内记录为 `table:key`：
//   - 创建: RecordId::from_table_key("employee", key)
//   - 读取: SELECT record::id(id) AS id, ... 直接得到 key
//
// 查询一律使用显式投影，createdAt/updatedAt/revision 不进入 API 模型。

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Record id for `key` in `table`
    pub fn thing(table: &str, key: &str) -> RecordId {
        RecordId::from_table_key(table, key)
    }

    /// Create `table:key` with `data` plus timestamps and revision 0
    pub async fn create_record<T: Serialize>(
        &self,
        table: &str,
        key: &str,
        data: &T,
    ) -> RepoResult<()> {
        let now = now_millis();
        let mut content = to_object(data)?;
        content.insert("createdAt".into(), now.into());
        content.insert("updatedAt".into(), now.into());
        content.insert("revision".into(), 0.into());

        self.db
            .query("CREATE $thing CONTENT $data RETURN NONE")
            .bind(("thing", Self::thing(table, key)))
            .bind(("data", Value::Object(content)))
            .await?
            .check()?;
        Ok(())
    }

    /// Merge `patch` into an existing record, touching `updatedAt` and bumping `revision`
    pub async fn merge_record<T: Serialize>(
        &self,
        table: &str,
        key: &str,
        patch: &T,
    ) -> RepoResult<()> {
        let mut content = to_object(patch)?;
        content.insert("updatedAt".into(), now_millis().into());

        self.db
            .query(
                r#"UPDATE $thing MERGE $patch RETURN NONE;
                UPDATE $thing SET revision += 1 RETURN NONE;"#,
            )
            .bind(("thing", Self::thing(table, key)))
            .bind(("patch", Value::Object(content)))
            .await?
            .check()?;
        Ok(())
    }

    /// Hard delete `table:key`
    pub async fn delete_record(&self, table: &str, key: &str) -> RepoResult<()> {
        self.db
            .query("DELETE $thing")
            .bind(("thing", Self::thing(table, key)))
            .await?
            .check()?;
        Ok(())
    }

    /// Delete every record of `table` (idempotent)
    pub async fn delete_all(&self, table: &str) -> RepoResult<()> {
        self.db
            .query("DELETE type::table($table)")
            .bind(("table", table.to_string()))
            .await?
            .check()?;
        Ok(())
    }
}

fn to_object<T: Serialize>(data: &T) -> RepoResult<Map<String, Value>> {
    match serde_json::to_value(data) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(RepoError::Validation(format!(
            "Expected an object, got {}",
            other
        ))),
        Err(e) => Err(RepoError::Database(format!("Failed to serialize record: {}", e))),
    }
}
