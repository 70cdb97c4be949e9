//! 请求体与路径参数的校验/转换

use serde_json::Value;
use shared::util::is_valid_record_id;

use crate::utils::{AppError, AppResult};
use crate::validation::FromCandidate;

/// Reject bodies that are not a non-empty JSON object
pub fn require_object(body: &Value) -> AppResult<()> {
    match body.as_object() {
        None => Err(AppError::invalid_request(
            "Request body must be a JSON object",
        )),
        Some(fields) if fields.is_empty() => Err(AppError::invalid_request(
            "Request body is empty or undefined",
        )),
        Some(_) => Ok(()),
    }
}

/// Validate a single-record body and convert it into its typed payload
pub fn parse_record<T: FromCandidate>(body: &Value) -> AppResult<T> {
    require_object(body)?;
    T::from_candidate(body).map_err(|errors| AppError::validation_errors("Validation Error", errors))
}

/// Check the syntax of a path identifier
pub fn require_id(id: &str) -> AppResult<()> {
    if is_valid_record_id(id) {
        Ok(())
    } else {
        Err(AppError::invalid_id(id))
    }
}

/// Trimmed query value, `None` when blank
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
