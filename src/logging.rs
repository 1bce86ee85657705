//! Structured logging for fitplan
//!
//! Diagnostics go to stderr through `tracing`, filtered by `RUST_LOG` or the
//! configured level. Activity notifications are emitted at INFO under
//! [`ACTIVITY_TARGET`]; when `activity_file` is set, a second layer appends
//! exactly those events to that file, one timestamped line each, so the file
//! is a persistent activity log across runs.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{Level, Subscriber};
use tracing_subscriber::{
    filter::Targets,
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Target of every activity notification recorded by an `ActivityLog`
pub const ACTIVITY_TARGET: &str = "fitplan::activity";

const DEFAULT_ACTIVITY_FILE_NAME: &str = "activity.log";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Diagnostic level for stderr (error, warn, info, debug, trace)
    pub level: LogLevel,

    /// Stderr output format (pretty, json, compact)
    pub format: LogFormat,

    /// Append activity notifications to this file (None keeps them in memory only)
    pub activity_file: Option<PathBuf>,

    /// Start a new activity file each day, suffixed with the date
    pub rotate_daily: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Compact,
            activity_file: None,
            rotate_daily: false,
        }
    }
}

/// Log level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    const ORDER: [LogLevel; 5] = [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    /// Directive name understood by `EnvFilter`
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Raise the level by `steps` notches, saturating at trace
    pub fn raised_by(self, steps: u8) -> Self {
        let current = Self::ORDER.iter().position(|l| *l == self).unwrap_or(0);
        Self::ORDER[(current + steps as usize).min(Self::ORDER.len() - 1)]
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "warning" => Ok(LogLevel::Warn),
            other => Self::ORDER
                .into_iter()
                .find(|l| l.as_directive() == other)
                .ok_or_else(|| format!("Invalid log level: {}", s)),
        }
    }
}

/// Stderr output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, human-readable
    Pretty,
    /// One JSON object per event
    Json,
    /// Single-line
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over the configured level for stderr. The
/// activity file is unaffected by either.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fitplan={}", config.level.as_directive())));

    let stderr_layer = match config.format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .without_time()
            .boxed(),
    }
    .with_filter(filter);

    let activity_layer = match &config.activity_file {
        Some(path) => Some(activity_layer(path, config.rotate_daily)?),
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(activity_layer)
        .try_init()?;

    tracing::debug!(
        level = ?config.level,
        format = ?config.format,
        activity_file = ?config.activity_file,
        "Logging initialized"
    );

    Ok(())
}

/// Filter that passes activity notifications and nothing else
pub fn activity_filter() -> Targets {
    Targets::new().with_target(ACTIVITY_TARGET, Level::INFO)
}

/// Layer appending activity notifications to `path` as plain lines
pub fn activity_layer<S>(
    path: &Path,
    rotate_daily: bool,
) -> anyhow::Result<Box<dyn Layer<S> + Send + Sync>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = fmt::layer()
        .with_writer(activity_writer(path, rotate_daily)?)
        .with_ansi(false)
        .with_target(false)
        .with_level(false)
        .with_filter(activity_filter());

    Ok(layer.boxed())
}

fn activity_writer(path: &Path, rotate_daily: bool) -> anyhow::Result<BoxMakeWriter> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    if rotate_daily {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(DEFAULT_ACTIVITY_FILE_NAME);
        return Ok(BoxMakeWriter::new(tracing_appender::rolling::daily(
            dir, file_name,
        )));
    }

    let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    Ok(BoxMakeWriter::new(Mutex::new(file)))
}
