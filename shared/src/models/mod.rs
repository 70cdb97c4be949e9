//! Data models
//!
//! Shared between roster-server and API clients.
//! All IDs are 32-digit hex strings (see [`crate::util::new_record_id`]).

pub mod employee;
pub mod serde_helpers;
pub mod task;

// Re-exports
pub use employee::*;
pub use task::*;
