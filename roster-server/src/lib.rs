//! Roster Server - 员工与任务管理 HTTP 服务
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储 (RocksDB)
//! - **校验** (`validation`): 员工/任务记录的字段校验
//! - **批量处理** (`bulk`): 批量创建与批量更新, 逐条分类结果
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! roster-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── routes/        # 路由装配与中间件
//! ├── bulk/          # 批量处理与响应组装
//! ├── validation/    # 记录校验
//! ├── utils/         # 日志、错误、时间工具
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod bulk;
pub mod core;
pub mod db;
pub mod routes;
pub mod utils;
pub mod validation;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use routes::build_app;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// 设置运行环境: 加载 .env 并初始化日志
///
/// 返回加载后的配置。
pub fn setup_environment() -> Config {
    if let Err(e) = dotenv::dotenv()
        && !e.not_found()
    {
        eprintln!("Failed to load .env: {}", e);
    }

    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );
    config
}

pub fn print_banner() {
    println!(
        r#"
    ____              __
   / __ \____  _____/ /____  _____
  / /_/ / __ \/ ___/ __/ _ \/ ___/
 / _, _/ /_/ (__  ) /_/  __/ /
/_/ |_|\____/____/\__/\___/_/
    "#
    );
}
