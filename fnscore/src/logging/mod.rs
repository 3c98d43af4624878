//! Structured logging for fnscore.
//!
//! Installs a global `tracing` subscriber in one of the configured formats,
//! writing to the console, a file, or both. The console is stdout unless the
//! caller supplies another sink through [`init_with_console`].


use crate::config::{LogFormat, LogLevel, LoggingConfig};
use std::path::Path;
use std::sync::OnceLock;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

/// Keeps the file writer's worker thread alive for the life of the process.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Error type for logging operations
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing log level
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Error in subscriber setup
    #[error("Subscriber error: {0}")]
    SubscriberError(String),
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Initialize the logging system with the given configuration.
///
/// `RUST_LOG`, when set, overrides the configured level. Calling this when a
/// global subscriber is already installed is not an error; the existing
/// subscriber is kept.
pub fn init(config: &LoggingConfig) -> Result<()> {
    init_with_console(config, std::io::stdout)
}

/// Like [`init`], but console output (`stdout = true` in the configuration)
/// goes to `console` instead of stdout.
pub fn init_with_console<W>(config: &LoggingConfig, console: W) -> Result<()>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level_to_level(config.level).as_str()));
    let writer = make_writer(config, console)?;

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_line_number(true)
            .with_writer(writer)
            .try_init(),
        LogFormat::Compact => tracing_subscriber::fmt()
            .compact()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(writer)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .with_line_number(true)
            .with_writer(writer)
            .try_init(),
        LogFormat::Default => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(writer)
            .try_init(),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "global subscriber already installed; keeping it");
    }

    Ok(())
}

/// Build the sink described by `config`: the console, a file, both, or neither.
fn make_writer<W>(config: &LoggingConfig, console: W) -> Result<BoxMakeWriter>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let file = match &config.file {
        Some(path) => Some(create_non_blocking_file(path)?),
        None => None,
    };

    Ok(match (config.stdout, file) {
        (true, Some(file)) => BoxMakeWriter::new(console.and(file)),
        (false, Some(file)) => BoxMakeWriter::new(file),
        (true, None) => BoxMakeWriter::new(console),
        (false, None) => BoxMakeWriter::new(std::io::sink),
    })
}

/// Create a non-blocking file writer.
fn create_non_blocking_file(
    path: impl AsRef<Path>,
) -> Result<tracing_appender::non_blocking::NonBlocking> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file_name = path.file_name().ok_or_else(|| {
        LogError::IoError(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("log file path has no file name: {}", path.display()),
        ))
    })?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // only the first initialisation's file sink is ever installed
    let _ = FILE_GUARD.set(guard);

    Ok(non_blocking)
}

/// Parse a log level string into a LogLevel enum.
pub fn parse_log_level(level: &str) -> Result<LogLevel> {
    level
        .parse()
        .map_err(|_| LogError::InvalidLogLevel(level.to_string()))
}

/// Convert a tracing::Level to a LogLevel enum.
pub fn level_to_log_level(level: Level) -> LogLevel {
    match level {
        Level::TRACE => LogLevel::Trace,
        Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warn,
        Level::ERROR => LogLevel::Error,
    }
}

/// Convert a LogLevel enum to a tracing::Level.
pub fn log_level_to_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}
