//! Logger initialization built on tracing-subscriber.
//!
//! Supports console and optional file output with a configurable level and
//! one of three formats (full, compact, json). Initialized once at startup
//! from `LoggerSettings` in the configuration.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Valid log levels accepted by [`LoggerConfig::new`]
const VALID_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Logger error types
#[derive(Debug, Error)]
pub enum LoggerError {
    /// Invalid log level string
    #[error("Invalid log level '{0}'. Valid levels are: trace, debug, info, warn, error")]
    InvalidLevel(String),

    /// Invalid log format string
    #[error("Invalid log format '{0}'. Valid formats are: full, compact, json")]
    InvalidFormat(String),

    /// Both console and file output are disabled
    #[error("At least one log output (console or file) must be enabled")]
    NoOutputEnabled,

    /// Failed to open the log file
    #[error("Failed to open log file")]
    Io(#[from] std::io::Error),

    /// Failed to install the global subscriber
    #[error("Failed to initialize logger: {0}")]
    Init(String),
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Default human-readable format
    #[default]
    Full,
    /// Condensed single-line format
    Compact,
    /// Newline-delimited JSON
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggerError::InvalidFormat(s.to_string())),
        }
    }
}

/// Console output configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Whether console output is enabled
    pub enabled: bool,
    /// Whether to use ANSI colors
    pub colored: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

/// File output configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileConfig {
    /// Whether file output is enabled
    pub enabled: bool,
    /// Path to the log file
    pub path: PathBuf,
    /// Whether to append to an existing file
    pub append: bool,
}

/// Runtime logger configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Output format applied to all outputs
    pub format: LogFormat,
    /// Console output configuration
    pub console: ConsoleConfig,
    /// File output configuration
    pub file: FileConfig,
}

impl LoggerConfig {
    /// Create a validated logger configuration
    ///
    /// # Errors
    /// - `InvalidLevel` if the level string is not a known level
    /// - `NoOutputEnabled` if both console and file output are disabled
    pub fn new(
        level: String,
        format: LogFormat,
        console: ConsoleConfig,
        file: FileConfig,
    ) -> Result<Self, LoggerError> {
        if !VALID_LEVELS.contains(&level.to_lowercase().as_str()) {
            return Err(LoggerError::InvalidLevel(level));
        }
        if !console.enabled && !file.enabled {
            return Err(LoggerError::NoOutputEnabled);
        }
        Ok(Self {
            level: level.to_lowercase(),
            format,
            console,
            file,
        })
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Full,
            console: ConsoleConfig::default(),
            file: FileConfig::default(),
        }
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Build a fmt layer in the requested format
fn fmt_layer<W>(format: LogFormat, ansi: bool, writer: W) -> BoxedLayer
where
    W: for<'a> tracing_subscriber::fmt::MakeWriter<'a> + Send + Sync + 'static,
{
    let base = tracing_subscriber::fmt::layer()
        .with_ansi(ansi)
        .with_writer(writer);
    match format {
        LogFormat::Full => base.boxed(),
        LogFormat::Compact => base.compact().boxed(),
        LogFormat::Json => base.json().boxed(),
    }
}

/// Initialize the global tracing subscriber from the given configuration.
///
/// Must be called at most once per process; a second call returns an
/// `Init` error from the underlying subscriber registration.
pub fn init_logger(config: LoggerConfig) -> Result<(), LoggerError> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|_| LoggerError::InvalidLevel(config.level.clone()))?;

    let mut layers: Vec<BoxedLayer> = Vec::new();

    if config.console.enabled {
        layers.push(fmt_layer(
            config.format,
            config.console.colored,
            std::io::stdout,
        ));
    }

    if config.file.enabled {
        if let Some(parent) = config.file.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(config.file.append)
            .truncate(!config.file.append)
            .write(true)
            .open(&config.file.path)?;
        layers.push(fmt_layer(config.format, false, Arc::new(file)));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| LoggerError::Init(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("full".parse::<LogFormat>().unwrap(), LogFormat::Full);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("invalid".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_logger_config_valid() {
        let config = LoggerConfig::new(
            "debug".to_string(),
            LogFormat::Compact,
            ConsoleConfig::default(),
            FileConfig::default(),
        )
        .expect("Should create config");
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Compact);
    }

    #[test]
    fn test_logger_config_normalizes_level_case() {
        let config = LoggerConfig::new(
            "INFO".to_string(),
            LogFormat::Full,
            ConsoleConfig::default(),
            FileConfig::default(),
        )
        .expect("Should create config");
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_logger_config_invalid_level() {
        let result = LoggerConfig::new(
            "verbose".to_string(),
            LogFormat::Full,
            ConsoleConfig::default(),
            FileConfig::default(),
        );
        assert!(matches!(result, Err(LoggerError::InvalidLevel(_))));
    }

    #[test]
    fn test_logger_config_no_output() {
        let result = LoggerConfig::new(
            "info".to_string(),
            LogFormat::Full,
            ConsoleConfig {
                enabled: false,
                colored: false,
            },
            FileConfig::default(),
        );
        assert!(matches!(result, Err(LoggerError::NoOutputEnabled)));
    }
}
