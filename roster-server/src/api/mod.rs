//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`employees`] - 员工管理接口 (`/api/employee`)
//! - [`tasks`] - 任务管理接口 (`/api/task`)

pub mod convert;

pub mod employees;
pub mod health;
pub mod tasks;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};
