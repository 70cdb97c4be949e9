//! Shared types for the roster service
//!
//! Common types used across crates including error types, API models,
//! pagination structures, and utility functions.

pub mod error;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use response::PageMeta;
