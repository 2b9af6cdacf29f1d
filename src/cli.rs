//! Command-line interface for the ping-notifier service.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};
use crate::error::AppResult;

// Include shadow-rs generated build information
use shadow_rs::shadow;
shadow!(build);

/// Custom validation functions for CLI arguments
mod validation {
    use std::fs;
    use std::path::PathBuf;

    /// Validate port number is within valid range (1-65535)
    pub fn validate_port(port_str: &str) -> Result<u16, String> {
        let port: u16 = port_str.parse().map_err(|_| {
            format!(
                "Port must be a valid number between 1 and 65535, got: '{}'",
                port_str
            )
        })?;

        if port == 0 {
            return Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string());
        }

        Ok(port)
    }

    /// Validate that a file path is accessible (exists and is readable)
    pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
        let path = PathBuf::from(path_str);

        if !path.exists() {
            return Err(format!("Configuration file does not exist: '{}'", path_str));
        }

        if !path.is_file() {
            return Err(format!("Configuration path is not a file: '{}'", path_str));
        }

        match fs::File::open(&path) {
            Ok(_) => Ok(path),
            Err(e) => Err(format!(
                "Cannot read configuration file '{}': {}",
                path_str, e
            )),
        }
    }

    /// Validate host address format (basic validation)
    pub fn validate_host_address(host_str: &str) -> Result<String, String> {
        let host = host_str.trim();

        if host.is_empty() {
            return Err("Host address cannot be empty".to_string());
        }

        if host.contains(' ') {
            return Err("Host address cannot contain spaces".to_string());
        }

        if host == "localhost" || host == "0.0.0.0" || host.starts_with("127.") {
            return Ok(host.to_string());
        }

        // Basic IPv4 validation
        if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
            let parts: Vec<&str> = host.split('.').collect();
            if parts.len() == 4 {
                for part in parts {
                    if part.parse::<u8>().is_err() {
                        return Err(format!("Invalid IPv4 address format: '{}'", host_str));
                    }
                }
                return Ok(host.to_string());
            }
        }

        if host.len() > 253 {
            return Err("Host address is too long (maximum 253 characters)".to_string());
        }

        // Allow hostnames and other valid formats
        Ok(host.to_string())
    }
}

/// Push notification fan-out service for ping creation events
#[derive(Parser, Debug)]
#[command(name = "ping-notifier")]
#[command(about = "Push notification fan-out service for ping creation events")]
#[command(long_about = "
Ping-notifier listens for ping-creation trigger invocations and fans each one
out as a multicast push notification to the other members of the group.

EXAMPLES:
    # Start the server with default configuration
    ping-notifier serve

    # Start server on custom host and port
    ping-notifier serve --host 0.0.0.0 --port 8080

    # Use custom configuration file
    ping-notifier --config /path/to/config.toml serve

    # Run in development mode with verbose logging
    ping-notifier --env development --verbose serve

    # Check configuration without starting server
    ping-notifier serve --dry-run

For more information about configuration options, see the documentation.
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Specify a custom configuration file to use instead of the default.
    /// The file should be in TOML format and contain valid configuration sections.
    /// The file must exist and be readable.
    ///
    /// Example: --config /etc/ping-notifier/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Force the application to use a specific environment configuration.
    /// This affects which configuration files are loaded and default settings.
    ///
    /// Available values: development (dev), test, staging, production (prod)
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Increases log output to debug level, showing detailed information
    /// about application operations. Useful for troubleshooting.
    /// Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Reduces log output to error level only, hiding informational messages.
    /// Useful for production deployments or automated scripts.
    /// Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Launches the HTTP server with the configured settings. The server will
    /// bind to the specified host and port and begin accepting trigger
    /// invocations.
    ///
    /// Examples:
    ///   ping-notifier serve                           # Start with defaults
    ///   ping-notifier serve --host 0.0.0.0 --port 80 # Bind to all interfaces on port 80
    ///   ping-notifier serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to
        ///
        /// The network interface address where the server will listen for connections.
        /// Use 127.0.0.1 for localhost only, or 0.0.0.0 to accept connections from any interface.
        ///
        /// Default: 127.0.0.1
        #[arg(long, value_name = "ADDRESS", value_parser = validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        ///
        /// The TCP port where the server will accept HTTP connections.
        /// Must be between 1 and 65535.
        ///
        /// Default: 3000
        #[arg(short, long, value_name = "PORT", value_parser = validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Set the logging verbosity for this server instance.
        /// This overrides both configuration file settings and global --verbose/--quiet flags.
        ///
        /// Available levels: error, warn, info, debug, trace
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        ///
        /// Performs a complete configuration validation check without starting the server.
        /// Returns exit code 0 if valid, non-zero if invalid.
        #[arg(long)]
        dry_run: bool,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

/// Configuration merger that handles CLI argument integration with file-based configuration
///
/// This struct implements the configuration precedence logic where CLI arguments
/// override configuration file values.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    /// Create a new configuration merger with base configuration
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Create a configuration merger by loading configuration from the specified path or default loader
    ///
    /// # Arguments
    /// * `config_path` - Optional path to configuration file. If None, uses default loader behavior
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading or validation fails
    pub fn from_config_path(config_path: Option<&PathBuf>) -> Result<Self, ConfigError> {
        let config = if let Some(path) = config_path {
            Self::load_config_from_file(path)?
        } else {
            ConfigLoader::new()?.load()?
        };

        Ok(Self::new(config))
    }

    /// Load configuration from a specific file path
    fn load_config_from_file(path: &PathBuf) -> Result<Settings, ConfigError> {
        // Route the explicit path through the loader's single-file mode
        unsafe {
            std::env::set_var("PING_CONFIG_FILE", path);
        }

        let result = ConfigLoader::new().and_then(|loader| loader.load());

        unsafe {
            std::env::remove_var("PING_CONFIG_FILE");
        }

        result
    }

    /// Merge CLI arguments with the base configuration
    ///
    /// This method applies CLI argument overrides according to the precedence rules:
    /// 1. CLI arguments have highest priority
    /// 2. Configuration file values are used as base
    ///
    /// # Arguments
    /// * `cli` - Parsed CLI arguments
    ///
    /// # Returns
    /// A new Settings instance with CLI overrides applied
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        // Apply logging level overrides from global flags
        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        // Apply command-specific overrides
        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            dry_run: _,
        }) = &cli.command
        {
            if let Some(host_addr) = host {
                config.server.host = host_addr.clone();
            }

            if let Some(port_num) = port {
                config.server.port = *port_num;
            }

            // Command-specific override takes precedence over global flags
            if let Some(level) = log_level {
                config.logger.level = level.clone().into();
            }
        }

        config.validate()?;

        Ok(config)
    }

    /// Get the current configuration (useful for inspection)
    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

/// Command handler for dispatching CLI commands
pub struct CommandHandler {
    config: Settings,
}

impl CommandHandler {
    /// Create a new command handler with the given configuration
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Handle the serve command with optional dry-run support
    ///
    /// # Arguments
    /// * `dry_run` - If true, validates configuration and exits without starting server
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Server startup errors (if not dry-run)
    pub async fn handle_serve(&self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            self.config.validate().map_err(crate::error::AppError::from)?;
            self.config
                .validate_upstreams()
                .map_err(crate::error::AppError::from)?;

            println!("✓ Configuration is valid");
            println!("✓ Server would bind to: {}", self.config.server.address());
            println!(
                "✓ Document store project: {}",
                self.config.firestore.project_id
            );
            println!("✓ Push delivery endpoint: {}", self.config.fcm.endpoint);
            println!("Dry run completed successfully - configuration is ready for deployment");
            return Ok(());
        }

        // Actual server startup is handled in main.rs
        Ok(())
    }

    /// Get the configuration (useful for integration with main application)
    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{FcmConfig, FirestoreConfig};
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_flag() {
        let result = Cli::try_parse_from(["ping-notifier", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_flag() {
        let result = Cli::try_parse_from(["ping-notifier", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_default_behavior() {
        let cli = Cli::try_parse_from(["ping-notifier"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
        assert!(cli.env.is_none());
    }

    #[test]
    fn test_serve_command() {
        let cli = Cli::try_parse_from([
            "ping-notifier",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
        ])
        .unwrap();
        if let Some(Commands::Serve {
            host,
            port,
            log_level: _,
            dry_run,
        }) = cli.command
        {
            assert_eq!(host, Some("0.0.0.0".to_string()));
            assert_eq!(port, Some(8080));
            assert!(!dry_run);
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_serve_dry_run_flag() {
        let cli = Cli::try_parse_from(["ping-notifier", "serve", "--dry-run"]).unwrap();
        if let Some(Commands::Serve { dry_run, .. }) = cli.command {
            assert!(dry_run);
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let result = Cli::try_parse_from(["ping-notifier", "--verbose", "--quiet"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_environment_values() {
        let cli = Cli::try_parse_from(["ping-notifier", "--env", "dev"]).unwrap();
        assert!(matches!(cli.env, Some(Environment::Development)));

        let cli = Cli::try_parse_from(["ping-notifier", "--env", "prod"]).unwrap();
        assert!(matches!(cli.env, Some(Environment::Production)));

        let cli = Cli::try_parse_from(["ping-notifier", "--env", "staging"]).unwrap();
        assert!(matches!(cli.env, Some(Environment::Staging)));
    }

    #[test]
    fn test_cli_parsing_with_invalid_port() {
        let result = Cli::try_parse_from(["ping-notifier", "serve", "--port", "0"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    // ========================================================================
    // ConfigurationMerger tests
    // ========================================================================

    fn create_valid_base_config() -> Settings {
        Settings {
            firestore: FirestoreConfig {
                project_id: "ping-mobile".to_string(),
                ..Default::default()
            },
            fcm: FcmConfig {
                server_key: "key".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_configuration_merger_merge_verbose_flag() {
        let merger = ConfigurationMerger::new(create_valid_base_config());

        let cli = Cli::try_parse_from(["ping-notifier", "--verbose"]).unwrap();
        let merged = merger.merge_cli_args(&cli).unwrap();

        assert_eq!(merged.logger.level, "debug");
    }

    #[test]
    fn test_configuration_merger_merge_quiet_flag() {
        let merger = ConfigurationMerger::new(create_valid_base_config());

        let cli = Cli::try_parse_from(["ping-notifier", "--quiet"]).unwrap();
        let merged = merger.merge_cli_args(&cli).unwrap();

        assert_eq!(merged.logger.level, "error");
    }

    #[test]
    fn test_configuration_merger_merge_serve_overrides() {
        let merger = ConfigurationMerger::new(create_valid_base_config());

        let cli = Cli::try_parse_from([
            "ping-notifier",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let merged = merger.merge_cli_args(&cli).unwrap();

        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 9000);
        assert_eq!(merged.logger.level, "debug");
    }

    #[test]
    fn test_configuration_merger_command_log_level_overrides_global() {
        let merger = ConfigurationMerger::new(create_valid_base_config());

        let cli =
            Cli::try_parse_from(["ping-notifier", "--verbose", "serve", "--log-level", "warn"])
                .unwrap();
        let merged = merger.merge_cli_args(&cli).unwrap();

        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_configuration_merger_validation_error() {
        let mut base = create_valid_base_config();
        base.server.port = 0;

        let merger = ConfigurationMerger::new(base);
        let cli = Cli::try_parse_from(["ping-notifier"]).unwrap();
        let result = merger.merge_cli_args(&cli);

        assert!(result.is_err());
        if let Err(ConfigError::ValidationError { field, .. }) = result {
            assert_eq!(field, "server.port");
        } else {
            panic!("Expected ValidationError for invalid port");
        }
    }

    #[test]
    fn test_configuration_merger_cli_fixes_validation_error() {
        let mut base = create_valid_base_config();
        base.server.port = 0;

        let merger = ConfigurationMerger::new(base);
        let cli = Cli::try_parse_from(["ping-notifier", "serve", "--port", "8080"]).unwrap();
        let merged = merger.merge_cli_args(&cli).unwrap();

        assert_eq!(merged.server.port, 8080);
    }

    // ========================================================================
    // Input validation tests
    // ========================================================================

    #[test]
    fn test_port_validation() {
        for port in ["1", "80", "3000", "65535"] {
            assert!(validation::validate_port(port).is_ok(), "Port {}", port);
        }
        for port in ["0", "65536", "abc", "-1", ""] {
            assert!(validation::validate_port(port).is_err(), "Port {}", port);
        }
    }

    #[test]
    fn test_host_validation() {
        for host in ["localhost", "127.0.0.1", "0.0.0.0", "192.168.1.1", "example.com"] {
            assert!(
                validation::validate_host_address(host).is_ok(),
                "Host {}",
                host
            );
        }
        for host in ["", "   ", "host with spaces", "999.999.999.999"] {
            assert!(
                validation::validate_host_address(host).is_err(),
                "Host '{}'",
                host
            );
        }
    }

    // ========================================================================
    // CommandHandler tests
    // ========================================================================

    #[tokio::test]
    async fn test_command_handler_serve_dry_run() {
        let handler = CommandHandler::new(create_valid_base_config());
        let result = handler.handle_serve(true).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_command_handler_serve_dry_run_missing_upstreams() {
        // Defaults carry no project id or server key
        let handler = CommandHandler::new(Settings::default());
        let result = handler.handle_serve(true).await;
        assert!(result.is_err());
    }
}
