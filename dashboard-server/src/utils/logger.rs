//! Logging Infrastructure
//!
//! Console output (pretty or JSON) plus optional daily rolling files:
//! - `app/app.YYYY-MM-DD.log` for everything except report events
//! - `report/report.YYYY-MM-DD.log` for events on the `report` target
//!
//! Both are swept after [`RETENTION_DAYS`].

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::Subscriber;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter::filter_fn, fmt, layer::SubscriberExt, prelude::*};

/// Log files older than this are deleted
pub const RETENTION_DAYS: i64 = 14;

/// Target used by export events
pub const REPORT_TARGET: &str = "report";

const LOG_KINDS: [&str; 2] = ["app", REPORT_TARGET];

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Delete rolled log files dated before `cutoff`
///
/// Returns how many files were removed.
pub fn cleanup_logs_before(log_dir: &Path, cutoff: NaiveDate) -> anyhow::Result<usize> {
    let mut removed = 0;

    for kind in LOG_KINDS {
        let dir = log_dir.join(kind);
        if !dir.exists() {
            continue;
        }
        let prefix = format!("{}.", kind);

        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let date = name
                .strip_prefix(prefix.as_str())
                .and_then(|d| d.strip_suffix(".log"))
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

            if let Some(date) = date
                && date < cutoff
            {
                fs::remove_file(&path)?;
                removed += 1;
                tracing::info!(file = %name, "Deleted old log file");
            }
        }
    }

    Ok(removed)
}

/// Delete log files older than [`RETENTION_DAYS`] (local time)
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<usize> {
    let cutoff = chrono::Local::now().date_naive() - chrono::Duration::days(RETENTION_DAYS);
    cleanup_logs_before(log_dir, cutoff)
}

fn file_layer<S>(dir: &Path, kind: &'static str, json: bool) -> anyhow::Result<BoxedLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let kind_dir = dir.join(kind);
    fs::create_dir_all(&kind_dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(kind)
        .filename_suffix("log")
        .build(kind_dir)?;
    let writer = std::sync::Mutex::new(appender);

    let is_report = kind == REPORT_TARGET;
    let filter = filter_fn(move |meta| (meta.target() == REPORT_TARGET) == is_report);

    let layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(writer);

    Ok(if json {
        layer.json().with_current_span(true).with_filter(filter).boxed()
    } else {
        layer.with_filter(filter).boxed()
    })
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug"); `RUST_LOG` takes precedence
/// * `json_format` - JSON console and file output
/// * `log_dir` - Optional directory for rolling file logs
///
/// # Examples
/// ```no_run
/// # fn main() -> anyhow::Result<()> {
/// dashboard_server::utils::init_logger_with_file("info", false, Some("./logs"))?;
/// # Ok(())
/// # }
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer: BoxedLayer<_> = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let mut layers = vec![console_layer];

    if let Some(dir) = log_dir {
        let log_dir = Path::new(dir);
        fs::create_dir_all(log_dir)?;

        for kind in LOG_KINDS {
            layers.push(file_layer(log_dir, kind, json_format)?);
        }

        tokio::spawn(periodic_cleanup(log_dir.to_path_buf()));
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()?;

    Ok(())
}

/// Initialize console-only logging
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

/// Runs every hour to sweep old log files
async fn periodic_cleanup(log_dir: PathBuf) {
    use tokio::time::{Duration, sleep};

    loop {
        if let Err(e) = cleanup_old_logs(&log_dir) {
            tracing::error!(error = %e, "Failed to cleanup old logs");
        }
        sleep(Duration::from_secs(3600)).await;
    }
}
