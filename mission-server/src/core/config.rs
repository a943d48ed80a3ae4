use std::path::PathBuf;

use shared::Locale;

use crate::auth::{JwtConfig, JwtError};

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (`.env` 文件由 `dotenv` 加载)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./work_dir | 工作目录 (日志、默认数据库) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_URL | sqlite://{WORK_DIR}/database/missions.db | SQLite 数据库 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 (`RUST_LOG` 优先) |
/// | LOG_JSON | production 时为 true | JSON 格式日志 |
/// | DEFAULT_LOCALE | fr | 请求未指定时的语言 |
/// | JWT_SECRET | (debug 构建自动生成) | 至少 32 字符 |
/// | JWT_EXPIRATION_MINUTES | 1440 | 令牌有效期 |
/// | JWT_ISSUER | mission-server | 令牌签发者 |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 优雅关闭超时 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/missions HTTP_PORT=8080 cargo run -p mission-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储日志和默认数据库
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// SQLite 连接字符串
    pub database_url: String,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    /// 日期标签和占位文本的默认语言
    pub default_locale: Locale,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 未设置的项使用默认值；只有 JWT 密钥可能导致失败。
    pub fn from_env() -> Result<Self, JwtError> {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./work_dir".into());
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| format!("sqlite://{work_dir}/database/missions.db"));

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_url,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(environment == "production"),
            default_locale: std::env::var("DEFAULT_LOCALE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            jwt: JwtConfig::from_env()?,
            shutdown_timeout_ms: std::env::var("SHUTDOWN_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
            work_dir,
            environment,
        })
    }

    /// 测试用配置: 内存数据库、临时 JWT 密钥，不读取环境变量
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        Self {
            work_dir: work_dir.into(),
            http_port,
            database_url: "sqlite::memory:".into(),
            environment: "test".into(),
            log_level: "debug".into(),
            log_json: false,
            default_locale: Locale::default(),
            jwt: JwtConfig::ephemeral(),
            shutdown_timeout_ms: 1000,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn uses_memory_database(&self) -> bool {
        self.database_url.contains(":memory:")
    }

    /// Create `logs/` and `database/` under the work dir
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.log_dir())?;
        std::fs::create_dir_all(self.database_dir())?;
        Ok(())
    }
}
