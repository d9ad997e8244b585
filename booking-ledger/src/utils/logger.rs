//! Logging Infrastructure
//!
//! Structured logging for the ledger and its host application:
//! - Console output (pretty for development, JSON for production)
//! - Optional daily rotating application logs (`app.YYYY-MM-DD`)
//! - Optional daily rotating audit logs (`audit.YYYY-MM-DD`), fed by the
//!   `audit` target that every committed booking write emits

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

use crate::config::LedgerConfig;

/// Tracing target of audit events
pub const AUDIT_TARGET: &str = "audit";

/// Application log file prefix
const APP_LOG_PREFIX: &str = "app";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Create `<log_dir>/app` and `<log_dir>/audit`
fn prepare_log_dirs(log_dir: &Path) -> anyhow::Result<(PathBuf, PathBuf)> {
    let app_log_dir = log_dir.join("app");
    let audit_log_dir = log_dir.join("audit");
    fs::create_dir_all(&app_log_dir)?;
    fs::create_dir_all(&audit_log_dir)?;
    Ok((app_log_dir, audit_log_dir))
}

/// Initialize the logging system with optional daily rotating logs
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn"); `RUST_LOG` wins when set
/// * `json_format` - Whether to use JSON format (true for production)
/// * `log_dir` - Optional directory for file logging
///
/// Fails if a global subscriber is already installed.
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter(level))
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter(level))
            .boxed()
    };
    layers.push(console_layer);

    if let Some(dir) = log_dir {
        let (app_log_dir, audit_log_dir) = prepare_log_dirs(Path::new(dir))?;

        // Application logs (rotated daily, subject to cleanup)
        let app_log = RollingFileAppender::new(Rotation::DAILY, app_log_dir, APP_LOG_PREFIX);
        let app_layer = fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(app_log))
            .with_filter(env_filter(level))
            .with_filter(filter_fn(|meta| meta.target() != AUDIT_TARGET))
            .boxed();
        layers.push(app_layer);

        // Audit logs (never cleaned up)
        let audit_log = RollingFileAppender::new(Rotation::DAILY, audit_log_dir, AUDIT_TARGET);
        let audit_layer = fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(audit_log))
            .with_filter(filter_fn(|meta| meta.target() == AUDIT_TARGET))
            .boxed();
        layers.push(audit_layer);
    }

    tracing_subscriber::registry().with(layers).try_init()?;
    Ok(())
}

/// Initialize the logging system (console only)
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

/// Initialize the logging system from [`LedgerConfig`] (`LOG_LEVEL` / `LOG_DIR`)
pub fn init_logger_from_config(config: &LedgerConfig) -> anyhow::Result<()> {
    init_logger_with_file(&config.log_level, false, config.log_dir.as_deref())
}

/// Delete application log files older than `keep_days` before `today`
///
/// Audit logs are never touched. Returns the number of deleted files.
pub fn cleanup_old_logs(log_dir: &Path, keep_days: i64, today: NaiveDate) -> anyhow::Result<usize> {
    let app_log_dir = log_dir.join("app");
    if !app_log_dir.exists() {
        return Ok(0);
    }

    let cutoff = today - chrono::Duration::days(keep_days);
    let mut deleted = 0;

    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        // Match app.YYYY-MM-DD
        if let Some(date_part) = name
            .strip_prefix(APP_LOG_PREFIX)
            .and_then(|rest| rest.strip_prefix('.'))
            && let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
            deleted += 1;
        }
    }

    Ok(deleted)
}

/// Audit log helper - records committed booking writes
///
/// # Examples
/// ```no_run
/// booking_ledger::audit_log!("create", 42_i64);
/// booking_ledger::audit_log!("delete", 42_i64, "status=ACTIVE");
/// ```
#[macro_export]
macro_rules! audit_log {
    ($action:expr, $booking_id:expr) => {
        tracing::info!(
            target: "audit",
            action = $action,
            booking_id = $booking_id,
            "AUDIT"
        );
    };
    ($action:expr, $booking_id:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            action = $action,
            booking_id = $booking_id,
            details = $details,
            "AUDIT"
        );
    };
}
