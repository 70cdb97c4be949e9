//! Task Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::bulk::{BulkInsert, BulkUpdate};
use crate::utils::time::MonthRange;
use shared::models::{Task, TaskCreate, TaskImportance, TaskStatus, TaskUpdate};
use shared::util::new_record_id;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "task";

const FIELDS: &str = "record::id(id) AS id, title, description, status, scheduled, day, \
     slotCount, startSlot, importance, employeeId, createdAt, updatedAt";

/// Optional filters of the monthly query
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthlyFilter {
    pub status: Option<TaskStatus>,
    pub importance: Option<TaskImportance>,
}

#[derive(Clone)]
pub struct TaskRepository {
    base: BaseRepository,
}

impl TaskRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all tasks in creation order
    pub async fn find_all(&self) -> RepoResult<Vec<Task>> {
        let tasks: Vec<Task> = self
            .base
            .db()
            .query(format!("SELECT {} FROM {} ORDER BY createdAt ASC", FIELDS, TABLE))
            .await?
            .take(0)?;
        Ok(tasks)
    }

    /// Find task by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Task>> {
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {} FROM $thing", FIELDS))
            .bind(("thing", BaseRepository::thing(TABLE, id)))
            .await?;
        let tasks: Vec<Task> = result.take(0)?;
        Ok(tasks.into_iter().next())
    }

    /// Find all tasks assigned to an employee
    pub async fn find_by_employee(&self, employee_id: &str) -> RepoResult<Vec<Task>> {
        let employee_id = employee_id.to_string();
        let tasks: Vec<Task> = self
            .base
            .db()
            .query(format!(
                "SELECT {} FROM {} WHERE employeeId = $employee_id ORDER BY createdAt ASC",
                FIELDS, TABLE
            ))
            .bind(("employee_id", employee_id))
            .await?
            .take(0)?;
        Ok(tasks)
    }

    /// Tasks of an employee whose `day` or `createdAt` falls within `range`
    ///
    /// Sorted by `day`, then `createdAt`, ascending.
    pub async fn find_monthly(
        &self,
        employee_id: &str,
        range: &MonthRange,
        filter: MonthlyFilter,
    ) -> RepoResult<Vec<Task>> {
        let mut sql = format!(
            "SELECT {} FROM {} WHERE employeeId = $employee_id \
             AND ((day >= $first_day AND day <= $last_day) \
             OR (createdAt >= $start AND createdAt <= $end))",
            FIELDS, TABLE
        );
        if filter.status.is_some() {
            sql.push_str(" AND status = $status");
        }
        if filter.importance.is_some() {
            sql.push_str(" AND importance = $importance");
        }
        sql.push_str(" ORDER BY day ASC, createdAt ASC");

        let tasks: Vec<Task> = self
            .base
            .db()
            .query(sql)
            .bind(("employee_id", employee_id.to_string()))
            .bind(("first_day", range.first_day_str()))
            .bind(("last_day", range.last_day_str()))
            .bind(("start", range.start_millis()))
            .bind(("end", range.end_millis()))
            .bind(("status", filter.status.map(|s| s.as_str()).unwrap_or_default()))
            .bind((
                "importance",
                filter.importance.map(|i| i.as_str()).unwrap_or_default(),
            ))
            .await?
            .take(0)?;
        Ok(tasks)
    }

    /// Create a new task
    pub async fn create(&self, data: TaskCreate) -> RepoResult<Task> {
        let id = new_record_id();
        self.base.create_record(TABLE, &id, &data).await?;
        self.find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create task".to_string()))
    }

    /// Update a task (partial merge)
    pub async fn update(&self, id: &str, data: TaskUpdate) -> RepoResult<Task> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Task {} not found", id)))?;

        self.base.merge_record(TABLE, id, &data).await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Task {} not found", id)))
    }

    /// Hard delete a task
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Task {} not found", id)))?;
        self.base.delete_record(TABLE, id).await?;
        Ok(true)
    }

    /// Delete every task
    pub async fn delete_all(&self) -> RepoResult<()> {
        self.base.delete_all(TABLE).await
    }
}

// No duplicate pre-check for tasks
impl BulkInsert for TaskRepository {
    type Create = TaskCreate;
    type Record = Task;

    async fn insert(&self, item: TaskCreate) -> RepoResult<Task> {
        self.create(item).await
    }
}

impl BulkUpdate for TaskRepository {
    type Update = TaskUpdate;
    type Record = Task;

    async fn apply(&self, id: &str, patch: TaskUpdate) -> RepoResult<Task> {
        self.update(id, patch).await
    }
}
