//! Mission Server - 礼宾公司任务协调平台
//!
//! # 架构概述
//!
//! - **数据库** (`db`): SQLite (sqlx)，嵌入式迁移
//! - **认证** (`auth`): 用户 ID 换取 JWT 会话
//! - **HTTP API** (`api`): RESTful 接口，任务列表管线来自 `shared::mission`
//! - **后台服务** (`services`): 通知意图、超时未开始任务巡检
//!
//! # 模块结构
//!
//! ```text
//! mission-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── auth/          # JWT、认证中间件、提取器
//! ├── services/      # 通知、后台巡检
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 错误转换、日志
//! └── db/            # 连接池和仓储
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// 设置运行环境: 加载 `.env`、读取配置、创建工作目录、初始化日志
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    config.ensure_work_dir_structure()?;

    let log_dir = config.log_dir().to_string_lossy().into_owned();
    init_logger_with_file(&config.log_level, config.log_json, Some(log_dir.as_str()))?;

    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
  __  __ _         _
 |  \/  (_)___ ___(_) ___  _ __  ___
 | |\/| | / __/ __| |/ _ \| '_ \/ __|
 | |  | | \__ \__ \ | (_) | | | \__ \
 |_|  |_|_|___/___/_|\___/|_| |_|___/
    "#
    );
}
