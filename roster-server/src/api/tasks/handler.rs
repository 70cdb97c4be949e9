//! Task API Handlers

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use shared::models::{
    MonthlyTaskReport, ReportPeriod, Task, TaskCreate, TaskImportance, TaskStats, TaskStatus,
    TaskUpdate,
};

use crate::api::convert::{non_blank, parse_record, require_id};
use crate::bulk::{
    self, BulkResponse,
    response::{InsertReport, UpdateReport},
};
use crate::core::ServerState;
use crate::db::repository::{MonthlyFilter, RepoError, TaskRepository};
use crate::utils::error::{json_rejection, query_rejection};
use crate::utils::time::MonthRange;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

/// Map repository errors onto task error codes
fn task_error(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(_) => AppError::new(ErrorCode::TaskNotFound),
        other => other.into(),
    }
}

/// Query string of the monthly report
#[derive(Debug, Default, Deserialize)]
pub struct MonthlyParams {
    month: Option<u32>,
    year: Option<i32>,
    status: Option<String>,
    importance: Option<String>,
}

impl MonthlyParams {
    fn filter(&self) -> AppResult<MonthlyFilter> {
        let mut errors = Vec::new();

        let status = match non_blank(self.status.clone()) {
            Some(s) => match s.parse::<TaskStatus>() {
                Ok(status) => Some(status),
                Err(_) => {
                    errors.push(format!(
                        "status must be one of: {}",
                        join(TaskStatus::ALL.iter().map(|s| s.as_str()))
                    ));
                    None
                }
            },
            None => None,
        };

        let importance = match non_blank(self.importance.clone()) {
            Some(i) => match i.parse::<TaskImportance>() {
                Ok(importance) => Some(importance),
                Err(_) => {
                    errors.push(format!(
                        "importance must be one of: {}",
                        join(TaskImportance::ALL.iter().map(|i| i.as_str()))
                    ));
                    None
                }
            },
            None => None,
        };

        if !errors.is_empty() {
            return Err(AppError::validation_errors("Invalid query parameters", errors));
        }
        Ok(MonthlyFilter { status, importance })
    }
}

fn join<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(", ")
}

/// Create a new task
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let Json(payload) = payload.map_err(json_rejection)?;
    let data: TaskCreate = parse_record(&payload)?;

    let repo = TaskRepository::new(state.db.clone());
    let task = repo.create(data).await.map_err(task_error)?;

    tracing::info!(id = %task.id, employee_id = %task.employee_id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// Create up to 100 tasks in one request
pub async fn bulk_create(
    State(state): State<ServerState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<BulkResponse<InsertReport<Task>>> {
    let Json(payload) = payload.map_err(json_rejection)?;

    let repo = TaskRepository::new(state.db.clone());
    let outcome = bulk::insert_all(&repo, payload).await?;

    tracing::info!(
        created = outcome.created.len(),
        failed = outcome.failed.len(),
        "Task bulk create processed"
    );
    Ok(bulk::compose_insert("tasks", outcome))
}

/// List all tasks
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Task>>> {
    let repo = TaskRepository::new(state.db.clone());
    let tasks = repo.find_all().await.map_err(task_error)?;
    Ok(Json(tasks))
}

/// Get task by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Task>> {
    require_id(&id)?;
    let repo = TaskRepository::new(state.db.clone());
    let task = repo
        .find_by_id(&id)
        .await
        .map_err(task_error)?
        .ok_or_else(|| AppError::new(ErrorCode::TaskNotFound).with_detail("id", id))?;
    Ok(Json(task))
}

/// List tasks assigned to an employee
pub async fn list_by_employee(
    State(state): State<ServerState>,
    Path(employee_id): Path<String>,
) -> AppResult<Json<Vec<Task>>> {
    require_id(&employee_id)?;
    let repo = TaskRepository::new(state.db.clone());
    let tasks = repo
        .find_by_employee(&employee_id)
        .await
        .map_err(task_error)?;
    Ok(Json(tasks))
}

/// Tasks of an employee for one month, with status statistics
pub async fn monthly(
    State(state): State<ServerState>,
    Path(employee_id): Path<String>,
    params: Result<Query<MonthlyParams>, QueryRejection>,
) -> AppResult<Json<MonthlyTaskReport>> {
    require_id(&employee_id)?;
    let Query(params) = params.map_err(query_rejection)?;
    let range = MonthRange::resolve(params.month, params.year)?;
    let filter = params.filter()?;

    let repo = TaskRepository::new(state.db.clone());
    let tasks = repo
        .find_monthly(&employee_id, &range, filter)
        .await
        .map_err(task_error)?;
    let stats = TaskStats::from_tasks(&tasks);

    tracing::debug!(
        employee_id = %employee_id,
        month = range.month,
        year = range.year,
        total = stats.total_tasks,
        "Monthly task report"
    );

    Ok(Json(MonthlyTaskReport {
        tasks,
        stats,
        period: ReportPeriod {
            month: range.month,
            year: range.year,
            start_date: range.start_rfc3339(),
            end_date: range.end_rfc3339(),
        },
    }))
}

/// Update a task (partial)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Task>> {
    require_id(&id)?;
    let Json(payload) = payload.map_err(json_rejection)?;
    let data: TaskUpdate = parse_record(&payload)?;

    let repo = TaskRepository::new(state.db.clone());
    let task = repo.update(&id, data).await.map_err(task_error)?;
    Ok(Json(task))
}

/// Apply partial updates to up to 100 tasks
pub async fn bulk_update(
    State(state): State<ServerState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<BulkResponse<UpdateReport<Task>>> {
    let Json(payload) = payload.map_err(json_rejection)?;

    let repo = TaskRepository::new(state.db.clone());
    let outcome = bulk::update_all(&repo, payload).await?;

    tracing::info!(
        updated = outcome.updated.len(),
        failed = outcome.failed.len(),
        "Task bulk update processed"
    );
    Ok(bulk::compose_update("tasks", outcome))
}

/// Delete a task
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse> {
    require_id(&id)?;
    let repo = TaskRepository::new(state.db.clone());
    repo.delete(&id).await.map_err(task_error)?;

    tracing::info!(id = %id, "Task deleted");
    Ok(ApiResponse::ok_with_message("Task deleted"))
}

/// Delete every task (idempotent)
pub async fn delete_all(State(state): State<ServerState>) -> AppResult<ApiResponse> {
    let repo = TaskRepository::new(state.db.clone());
    repo.delete_all().await.map_err(task_error)?;

    tracing::info!("All tasks deleted");
    Ok(ApiResponse::ok_with_message("All tasks deleted"))
}
