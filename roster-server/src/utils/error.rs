//! 统一错误处理
//!
//! 错误类型统一来自 `shared::error`，此处仅做 re-export，
//! 并提供请求体解析失败到 [`AppError`] 的转换。
//!
//! # 错误码规范
//!
//! | 范围 | 分类 | 示例 |
//! |------|------|------|
//! | 0xxx | 通用错误 | 2 验证失败, 3 资源不存在 |
//! | 80xx | 员工错误 | 8002 邮箱已存在 |
//! | 85xx | 任务错误 | 8501 任务不存在 |
//! | 9xxx | 系统错误 | 9002 数据库错误 |

use axum::extract::rejection::{JsonRejection, QueryRejection};

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};

/// Map a JSON body rejection (missing, unparsable or wrong content type) to a 400
pub fn json_rejection(rejection: JsonRejection) -> AppError {
    AppError::invalid_request(rejection.body_text())
}

/// Map a query-string rejection to a 400
pub fn query_rejection(rejection: QueryRejection) -> AppError {
    AppError::invalid_request(rejection.body_text())
}
