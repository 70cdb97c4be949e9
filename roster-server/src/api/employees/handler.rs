//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use shared::PageMeta;
use shared::models::{Employee, EmployeeCreate, EmployeePage, EmployeeUpdate};

use crate::api::convert::{non_blank, parse_record, require_id};
use crate::bulk::{self, BulkResponse, response::InsertReport};
use crate::core::ServerState;
use crate::db::repository::{EmployeeQuery, EmployeeRepository, RepoError, SortField, SortOrder};
use crate::utils::error::json_rejection;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 10;
const MAX_LIMIT: u64 = 100;

/// Map repository errors onto employee error codes
fn employee_error(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(_) => AppError::new(ErrorCode::EmployeeNotFound),
        RepoError::Duplicate(_) => AppError::new(ErrorCode::EmployeeEmailExists),
        other => other.into(),
    }
}

/// Query string of the paginated listing
///
/// Values are taken as text so malformed numbers fall back to defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    page: Option<String>,
    limit: Option<String>,
    search: Option<String>,
    department: Option<String>,
    position: Option<String>,
    sort_by: Option<String>,
    sort_order: Option<String>,
}

impl PageParams {
    /// Page number, at least 1
    fn page(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u64>().ok())
            .map(|p| p.max(1))
            .unwrap_or(DEFAULT_PAGE)
    }

    /// Page size, clamped to 1..=100
    fn limit(&self) -> u64 {
        self.limit
            .as_deref()
            .and_then(|l| l.trim().parse::<u64>().ok())
            .map(|l| l.clamp(1, MAX_LIMIT))
            .unwrap_or(DEFAULT_LIMIT)
    }

    fn into_query(self) -> EmployeeQuery {
        EmployeeQuery {
            sort_by: SortField::parse(self.sort_by.as_deref()),
            sort_order: SortOrder::parse(self.sort_order.as_deref()),
            search: non_blank(self.search),
            department: non_blank(self.department),
            position: non_blank(self.position),
        }
    }
}

/// List all employees
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Employee>>> {
    let repo = EmployeeRepository::new(state.db.clone());
    let employees = repo.find_all().await.map_err(employee_error)?;
    Ok(Json(employees))
}

/// Filtered, sorted and paginated listing
pub async fn list_paginated(
    State(state): State<ServerState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<EmployeePage>> {
    let page = params.page();
    let limit = params.limit();
    let query = params.into_query();

    let repo = EmployeeRepository::new(state.db.clone());
    let (employees, total) = repo
        .find_filtered(&query, PageMeta::skip(page, limit), limit)
        .await
        .map_err(employee_error)?;

    Ok(Json(EmployeePage {
        employees,
        pagination: PageMeta::new(page, limit, total),
    }))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    require_id(&id)?;
    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo
        .find_by_id(&id)
        .await
        .map_err(employee_error)?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound).with_detail("id", id))?;
    Ok(Json(employee))
}

/// Create a new employee
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let Json(payload) = payload.map_err(json_rejection)?;
    let data: EmployeeCreate = parse_record(&payload)?;

    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo.create(data).await.map_err(employee_error)?;

    tracing::info!(id = %employee.id, "Employee created");
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Create up to 100 employees in one request
pub async fn bulk_create(
    State(state): State<ServerState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<BulkResponse<InsertReport<Employee>>> {
    let Json(payload) = payload.map_err(json_rejection)?;

    let repo = EmployeeRepository::new(state.db.clone());
    let outcome = bulk::insert_all(&repo, payload).await?;

    tracing::info!(
        created = outcome.created.len(),
        duplicates = outcome.duplicates.len(),
        failed = outcome.failed.len(),
        "Employee bulk create processed"
    );
    Ok(bulk::compose_insert("employees", outcome))
}

/// Update an employee (partial)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Employee>> {
    require_id(&id)?;
    let Json(payload) = payload.map_err(json_rejection)?;
    let data: EmployeeUpdate = parse_record(&payload)?;

    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo.update(&id, data).await.map_err(employee_error)?;
    Ok(Json(employee))
}

/// Delete an employee
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse> {
    require_id(&id)?;
    let repo = EmployeeRepository::new(state.db.clone());
    repo.delete(&id).await.map_err(employee_error)?;

    tracing::info!(id = %id, "Employee deleted");
    Ok(ApiResponse::ok_with_message("Employee deleted"))
}

/// Delete every employee (idempotent)
pub async fn delete_all(State(state): State<ServerState>) -> AppResult<ApiResponse> {
    let repo = EmployeeRepository::new(state.db.clone());
    repo.delete_all().await.map_err(employee_error)?;

    tracing::info!("All employees deleted");
    Ok(ApiResponse::ok_with_message("All employees deleted"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<&str>, limit: Option<&str>) -> PageParams {
        PageParams {
            page: page.map(String::from),
            limit: limit.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_page_defaults_and_clamping() {
        assert_eq!(params(None, None).page(), 1);
        assert_eq!(params(None, None).limit(), 10);
        assert_eq!(params(Some("0"), Some("0")).page(), 1);
        assert_eq!(params(Some("0"), Some("0")).limit(), 1);
        assert_eq!(params(Some("3"), Some("500")).limit(), 100);
        assert_eq!(params(Some("abc"), Some("-4")).page(), 1);
        assert_eq!(params(Some("abc"), Some("-4")).limit(), 10);
    }

    #[test]
    fn test_into_query_drops_blank_filters() {
        let query = PageParams {
            search: Some("  ".into()),
            department: Some("Sales".into()),
            sort_by: Some("salary".into()),
            sort_order: Some("asc".into()),
            ..Default::default()
        }
        .into_query();
        assert_eq!(query.search, None);
        assert_eq!(query.department.as_deref(), Some("Sales"));
        assert_eq!(query.sort_by, SortField::Salary);
        assert_eq!(query.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_employee_error_codes() {
        assert_eq!(
            employee_error(RepoError::Duplicate("x".into())).http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            employee_error(RepoError::NotFound("x".into())).code,
            ErrorCode::EmployeeNotFound
        );
        assert_eq!(
            employee_error(RepoError::Database("x".into())).code,
            ErrorCode::DatabaseError
        );
    }
}
