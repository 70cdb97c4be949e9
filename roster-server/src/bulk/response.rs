//! Bulk response composition
//!
//! | created/updated | duplicates or failures | status |
//! |-----------------|------------------------|--------|
//! | 0               | any                    | 400    |
//! | > 0             | > 0                    | 207    |
//! | > 0             | 0                      | 201 (create) / 200 (update) |

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use super::processor::{FailedItem, InsertOutcome, UpdateOutcome};

#[derive(Debug, Serialize)]
pub struct Section<T> {
    pub count: usize,
    pub records: Vec<T>,
}

impl<T> Section<T> {
    fn new(records: Vec<T>) -> Self {
        Self {
            count: records.len(),
            records,
        }
    }

    fn non_empty(records: Vec<T>) -> Option<Self> {
        (!records.is_empty()).then(|| Self::new(records))
    }
}

#[derive(Debug, Serialize)]
pub struct FailedSection {
    pub count: usize,
    pub errors: Vec<FailedItem>,
}

impl FailedSection {
    fn non_empty(errors: Vec<FailedItem>) -> Option<Self> {
        (!errors.is_empty()).then(|| Self {
            count: errors.len(),
            errors,
        })
    }
}

/// Body of a bulk create response
#[derive(Debug, Serialize)]
pub struct InsertReport<R> {
    pub message: String,
    pub success: Section<R>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicates: Option<Section<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<FailedSection>,
}

/// Body of a bulk update response
#[derive(Debug, Serialize)]
pub struct UpdateReport<R> {
    pub message: String,
    pub updated: Section<R>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<FailedSection>,
}

/// Status plus JSON body, ready to return from a handler
#[derive(Debug)]
pub struct BulkResponse<B> {
    pub status: StatusCode,
    pub body: B,
}

impl<B: Serialize> IntoResponse for BulkResponse<B> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Fixed precedence: nothing succeeded, then partial, then full success
pub fn aggregate_status(succeeded: usize, problems: usize, full_success: StatusCode) -> StatusCode {
    if succeeded == 0 {
        StatusCode::BAD_REQUEST
    } else if problems > 0 {
        StatusCode::MULTI_STATUS
    } else {
        full_success
    }
}

/// Compose the response of a bulk create over `noun` records
pub fn compose_insert<R: Serialize>(
    noun: &str,
    outcome: InsertOutcome<R>,
) -> BulkResponse<InsertReport<R>> {
    let created = outcome.created.len();
    let duplicates = outcome.duplicates.len();
    let failed = outcome.failed.len();
    let status = aggregate_status(created, duplicates + failed, StatusCode::CREATED);

    let message = match status {
        StatusCode::CREATED => format!("All {} {} created successfully", created, noun),
        StatusCode::MULTI_STATUS => format!(
            "{} {} created, {} duplicates, {} failed",
            created, noun, duplicates, failed
        ),
        _ => format!(
            "No {} were created ({} duplicates, {} failed)",
            noun, duplicates, failed
        ),
    };

    BulkResponse {
        status,
        body: InsertReport {
            message,
            success: Section::new(outcome.created),
            duplicates: Section::non_empty(outcome.duplicates),
            failed: FailedSection::non_empty(outcome.failed),
        },
    }
}

/// Compose the response of a bulk update over `noun` records
pub fn compose_update<R: Serialize>(
    noun: &str,
    outcome: UpdateOutcome<R>,
) -> BulkResponse<UpdateReport<R>> {
    let updated = outcome.updated.len();
    let failed = outcome.failed.len();
    let status = aggregate_status(updated, failed, StatusCode::OK);

    let message = match status {
        StatusCode::OK => format!("All {} {} updated successfully", updated, noun),
        StatusCode::MULTI_STATUS => format!("{} {} updated, {} failed", updated, noun, failed),
        _ => format!("No {} were updated ({} failed)", noun, failed),
    };

    BulkResponse {
        status,
        body: UpdateReport {
            message,
            updated: Section::new(outcome.updated),
            failed: FailedSection::non_empty(outcome.failed),
        },
    }
}
