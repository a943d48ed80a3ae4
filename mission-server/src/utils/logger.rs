//! Logging Infrastructure
//!
//! Structured logging for development and production.
//! Features:
//! - Daily rotating application logs (deleted after 14 days)
//! - Permanent security logs (never deleted)
//! - Notification logs: one line per message the platform would send out,
//!   rotated daily like application logs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::Metadata;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, filter::filter_fn, fmt, prelude::*};

/// Application and notification logs older than this are removed
pub const RETENTION_DAYS: i64 = 14;

const SECURITY_TARGET: &str = "security";
const NOTIFICATION_TARGET: &str = "notification";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Remove rotated `app` and `notification` files older than [`RETENTION_DAYS`]
///
/// Security logs are kept forever.
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<usize> {
    let cutoff = chrono::Local::now().date_naive() - chrono::Duration::days(RETENTION_DAYS);
    let mut removed = 0;

    for prefix in ["app", NOTIFICATION_TARGET] {
        let dir = log_dir.join(prefix);
        if !dir.exists() {
            continue;
        }
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            // rolling appender names files `<prefix>.YYYY-MM-DD`
            let Some(date) = name
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('.'))
                .and_then(|d| chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            else {
                continue;
            };
            if date < cutoff {
                fs::remove_file(&path)?;
                removed += 1;
                tracing::info!(file = %name, "Deleted old log file");
            }
        }
    }

    Ok(removed)
}

fn file_layer<F>(dir: &Path, prefix: &str, json: bool, keep: F) -> BoxedLayer
where
    F: Fn(&Metadata<'_>) -> bool + Send + Sync + 'static,
{
    let appender = RollingFileAppender::new(Rotation::DAILY, dir.join(prefix), prefix);
    let layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(appender));
    if json {
        layer.json().with_current_span(true).with_filter(filter_fn(keep)).boxed()
    } else {
        layer.with_filter(filter_fn(keep)).boxed()
    }
}

/// Initialize the logging system with daily rotating logs
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn")
/// * `json_format` - JSON lines (production) or human-readable (development)
/// * `log_dir` - Optional directory for file logging (e.g., Some("./work_dir/logs"))
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console: BoxedLayer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };
    let mut layers = vec![console];

    if let Some(dir) = log_dir {
        let log_dir = Path::new(dir);
        for sub in ["app", SECURITY_TARGET, NOTIFICATION_TARGET] {
            fs::create_dir_all(log_dir.join(sub))?;
        }

        layers.push(file_layer(log_dir, "app", json_format, |meta| {
            meta.target() != SECURITY_TARGET && meta.target() != NOTIFICATION_TARGET
        }));
        layers.push(file_layer(log_dir, SECURITY_TARGET, json_format, |meta| {
            meta.target() == SECURITY_TARGET
        }));
        layers.push(file_layer(log_dir, NOTIFICATION_TARGET, json_format, |meta| {
            meta.target() == NOTIFICATION_TARGET
        }));

        tokio::spawn(periodic_cleanup(log_dir.to_path_buf()));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

/// Runs every hour to clean old logs
async fn periodic_cleanup(log_dir: PathBuf) {
    use tokio::time::{Duration, sleep};

    loop {
        sleep(Duration::from_secs(3600)).await;

        if let Err(e) = cleanup_old_logs(&log_dir) {
            tracing::error!(error = %e, "Failed to cleanup old logs");
        }
    }
}

/// Console only
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

/// Security log helper - records security-related events
///
/// Security logs are stored in `security/security.YYYY-MM-DD` and never
/// deleted.
///
/// # Examples
/// ```no_run
/// use mission_server::security_log;
///
/// security_log!(WARN, "auth_failed", user_id = "u-123", reason = "unknown_user");
/// security_log!(INFO, "session_opened", user_id = "u-123", role = "employee");
/// ```
#[macro_export]
macro_rules! security_log {
    (WARN, $event:expr, $($arg:tt)*) => {
        tracing::warn!(
            target: "security",
            event = $event,
            timestamp = chrono::Local::now().to_rfc3339(),
            level = "WARN",
            $($arg)*
        );
    };
    (ERROR, $event:expr, $($arg:tt)*) => {
        tracing::error!(
            target: "security",
            event = $event,
            timestamp = chrono::Local::now().to_rfc3339(),
            level = "ERROR",
            $($arg)*
        );
    };
    (INFO, $event:expr, $($arg:tt)*) => {
        tracing::info!(
            target: "security",
            event = $event,
            timestamp = chrono::Local::now().to_rfc3339(),
            level = "INFO",
            $($arg)*
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_keeps_recent_and_security_logs() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        for sub in ["app", "security", "notification"] {
            fs::create_dir_all(root.join(sub)).unwrap();
        }
        let today = chrono::Local::now().date_naive();
        let old = today - chrono::Duration::days(RETENTION_DAYS + 3);
        let stamp = |d: chrono::NaiveDate| d.format("%Y-%m-%d").to_string();

        fs::write(root.join("app").join(format!("app.{}", stamp(old))), "x").unwrap();
        fs::write(root.join("app").join(format!("app.{}", stamp(today))), "x").unwrap();
        fs::write(root.join("app").join("README"), "x").unwrap();
        fs::write(
            root.join("notification").join(format!("notification.{}", stamp(old))),
            "x",
        )
        .unwrap();
        fs::write(root.join("security").join(format!("security.{}", stamp(old))), "x").unwrap();

        let removed = cleanup_old_logs(root).unwrap();
        assert_eq!(removed, 2);
        assert!(root.join("app").join(format!("app.{}", stamp(today))).exists());
        assert!(root.join("app").join("README").exists());
        assert!(root.join("security").join(format!("security.{}", stamp(old))).exists());
    }
}
