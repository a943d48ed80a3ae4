use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::db::DbService;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc / 连接池实现浅拷贝，每个请求克隆一次。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | 数据库连接池 |
/// | jwt | Arc<JwtService> | JWT 认证服务 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt: Arc<JwtService>,
}

impl ServerState {
    /// 手动构造 (测试中配合内存数据库使用)
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let jwt = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self { config, pool, jwt }
    }

    /// 初始化服务器状态
    ///
    /// 1. 创建工作目录结构
    /// 2. 打开数据库并执行迁移
    /// 3. 创建 JWT 服务
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db = if config.uses_memory_database() {
            DbService::in_memory().await?
        } else {
            DbService::new(&config.database_url).await?
        };

        Ok(Self::new(config.clone(), db.pool))
    }
}
