//! 批量处理 - 批量创建/更新与响应组装

pub mod processor;
pub mod response;

pub use processor::{BulkInsert, BulkUpdate, FailedItem, MAX_BULK_RECORDS, insert_all, update_all};
pub use response::{BulkResponse, compose_insert, compose_update};
