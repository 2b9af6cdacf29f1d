//! Errors raised while loading and validating settings.

use thiserror::Error;

/// Failure while assembling `Settings` from files, `PING_*` environment
/// variables, and CLI overrides.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required settings file is missing on disk (`default.toml`, or the
    /// file named by `PING_CONFIG_FILE` / `--config`)
    #[error("Settings file missing: {0}")]
    FileNotFound(String),

    /// The merged sources could not be deserialized into `Settings`
    #[error("Settings could not be parsed: {0}")]
    ParseError(String),

    /// A settings field holds a value outside its accepted range
    #[error("Invalid setting {field}: {message}")]
    ValidationError {
        /// Dotted path of the offending field, e.g. `server.port`
        field: String,
        /// What the field must satisfy
        message: String,
    },

    /// An environment variable such as `PING_APP_ENV` holds a value this
    /// service does not recognize
    #[error("Environment variable error: {0}")]
    EnvVarError(String),

    /// `PING_CONFIG_DIR` and `PING_CONFIG_FILE` are both set; layered and
    /// single-file loading cannot be combined
    #[error("Conflicting settings sources: {0}")]
    MutualExclusivityError(String),

    /// Error surfaced by the underlying `config` builder
    #[error("Settings error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    /// Invalid value for the named settings field
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Missing settings file at the given path
    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        ConfigError::FileNotFound(path.into())
    }

    /// Both settings-source variables set at once
    pub fn mutual_exclusivity<S: Into<String>>(message: S) -> Self {
        ConfigError::MutualExclusivityError(message.into())
    }
}
