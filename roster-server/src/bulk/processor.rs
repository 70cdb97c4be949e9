//! Bulk create / update processing
//!
//! Phase 1 validates every candidate; a single invalid record aborts the
//! request before any store I/O. Phase 2 persists records one at a time in
//! input order, capturing each outcome without stopping on failures.

use serde::Serialize;
use serde_json::{Value, json};
use shared::util::is_valid_record_id;

use crate::db::repository::{RepoError, RepoResult};
use crate::utils::{AppError, AppResult};
use crate::validation::FromCandidate;

/// Largest accepted batch
pub const MAX_BULK_RECORDS: usize = 100;

/// Store side of a bulk create
#[allow(async_fn_in_trait)]
pub trait BulkInsert {
    type Create: FromCandidate;
    type Record: Serialize;

    /// Whether `item` collides with an existing record's unique key
    async fn is_duplicate(&self, _item: &Self::Create) -> RepoResult<bool> {
        Ok(false)
    }

    async fn insert(&self, item: Self::Create) -> RepoResult<Self::Record>;
}

/// Store side of a bulk partial update
#[allow(async_fn_in_trait)]
pub trait BulkUpdate {
    type Update: FromCandidate;
    type Record: Serialize;

    /// Apply `patch` to record `id`; a missing record is [`RepoError::NotFound`]
    async fn apply(&self, id: &str, patch: Self::Update) -> RepoResult<Self::Record>;
}

/// Per-item failure
#[derive(Debug, Clone, Serialize)]
pub struct FailedItem {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub record: Value,
    pub error: String,
}

/// Result of a bulk create
#[derive(Debug)]
pub struct InsertOutcome<R> {
    pub created: Vec<R>,
    /// Input records rejected for an existing unique key
    pub duplicates: Vec<Value>,
    pub failed: Vec<FailedItem>,
}

/// Result of a bulk update
#[derive(Debug)]
pub struct UpdateOutcome<R> {
    pub updated: Vec<R>,
    pub failed: Vec<FailedItem>,
}

/// Check the body is an array of 1..=MAX_BULK_RECORDS elements
pub fn require_batch(body: Value) -> AppResult<Vec<Value>> {
    let Value::Array(records) = body else {
        return Err(AppError::invalid_request("Request body must be an array"));
    };
    if records.is_empty() {
        return Err(AppError::validation("Request body must be a non-empty array"));
    }
    if records.len() > MAX_BULK_RECORDS {
        return Err(
            AppError::validation("Too many records: maximum is 100 per request")
                .with_detail("count", records.len())
                .with_detail("max", MAX_BULK_RECORDS),
        );
    }
    Ok(records)
}

/// Validate all records, then insert them sequentially
pub async fn insert_all<S: BulkInsert>(
    store: &S,
    body: Value,
) -> AppResult<InsertOutcome<S::Record>> {
    let records = require_batch(body)?;

    // Phase 1: validate everything
    let mut valid = Vec::with_capacity(records.len());
    let mut invalid = Vec::new();
    for (index, record) in records.iter().enumerate() {
        match S::Create::from_candidate(record) {
            Ok(item) => valid.push(item),
            Err(errors) => invalid.push(json!({
                "index": index,
                "record": record,
                "errors": errors,
            })),
        }
    }

    if !invalid.is_empty() {
        tracing::debug!(
            valid = valid.len(),
            invalid = invalid.len(),
            "Bulk insert rejected during validation"
        );
        return Err(
            AppError::validation("Validation failed for one or more records")
                .with_detail("validCount", valid.len())
                .with_detail("invalidCount", invalid.len())
                .with_detail("errors", invalid),
        );
    }

    // Phase 2: persist in input order
    let mut outcome = InsertOutcome {
        created: Vec::new(),
        duplicates: Vec::new(),
        failed: Vec::new(),
    };
    for (index, (item, record)) in valid.into_iter().zip(records).enumerate() {
        match store.is_duplicate(&item).await {
            Ok(true) => {
                outcome.duplicates.push(record);
                continue;
            }
            Ok(false) => {}
            Err(e) => {
                outcome.failed.push(failure(index, None, record, e));
                continue;
            }
        }

        match store.insert(item).await {
            Ok(created) => outcome.created.push(created),
            Err(RepoError::Duplicate(_)) => outcome.duplicates.push(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "Bulk insert item failed");
                outcome.failed.push(failure(index, None, record, e));
            }
        }
    }

    Ok(outcome)
}

/// Apply a list of `{id, updates}` items, each independently
///
/// `_id` is accepted in place of `id`. Without an `updates` member the
/// remaining fields of the item are the patch.
pub async fn update_all<S: BulkUpdate>(
    store: &S,
    body: Value,
) -> AppResult<UpdateOutcome<S::Record>> {
    let items = require_batch(body)?;

    let mut outcome = UpdateOutcome {
        updated: Vec::new(),
        failed: Vec::new(),
    };
    for (index, item) in items.into_iter().enumerate() {
        let (id, patch) = match split_update_item(&item) {
            Ok(parts) => parts,
            Err(error) => {
                outcome.failed.push(FailedItem {
                    index,
                    id: item_id(&item),
                    record: item,
                    error,
                });
                continue;
            }
        };

        let update = match S::Update::from_candidate(&patch) {
            Ok(update) => update,
            Err(errors) => {
                outcome.failed.push(FailedItem {
                    index,
                    id: Some(id),
                    record: item,
                    error: errors.join("; "),
                });
                continue;
            }
        };

        match store.apply(&id, update).await {
            Ok(record) => outcome.updated.push(record),
            Err(e) => {
                tracing::warn!(index, id = %id, error = %e, "Bulk update item failed");
                outcome.failed.push(failure(index, Some(id), item, e));
            }
        }
    }

    Ok(outcome)
}

fn item_id(item: &Value) -> Option<String> {
    item.get("id")
        .or_else(|| item.get("_id"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn split_update_item(item: &Value) -> Result<(String, Value), String> {
    let Some(fields) = item.as_object() else {
        return Err("Item must be a JSON object".to_string());
    };
    let id = item_id(item).ok_or_else(|| "id is required".to_string())?;
    if !is_valid_record_id(&id) {
        return Err("Invalid ID format".to_string());
    }

    let patch = match fields.get("updates") {
        Some(updates) => updates.clone(),
        None => Value::Object(
            fields
                .iter()
                .filter(|(k, _)| !matches!(k.as_str(), "id" | "_id"))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        ),
    };
    Ok((id, patch))
}

fn failure(index: usize, id: Option<String>, record: Value, err: RepoError) -> FailedItem {
    let error = match err {
        RepoError::NotFound(_) => "Record not found".to_string(),
        RepoError::Duplicate(msg)
        | RepoError::Database(msg)
        | RepoError::Validation(msg) => msg,
    };
    FailedItem {
        index,
        id,
        record,
        error,
    }
}
