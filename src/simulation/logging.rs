//! Logging and tracing configuration
//!
//! Diagnostics go to stderr so that experiment reports on stdout stay clean.
//! `RUST_LOG` overrides the configured level when set.

use std::io;
use tracing::{debug, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Error raised while installing the global subscriber
pub type LoggingInitError = Box<dyn std::error::Error + Send + Sync>;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for the crate
    pub level: Level,
    /// Whether console output is JSON
    pub json_format: bool,
    /// Directory of the daily rolling log file, if any
    pub log_directory: Option<String>,
    /// Log file prefix
    pub log_file_prefix: String,
    /// Whether span open/close events are logged
    pub enable_span_events: bool,
    /// Whether to enable ansi colors in console output
    pub enable_ansi: bool,
    /// Custom filter directive replacing the level
    pub env_filter: Option<String>,
}

/// Keeps the non-blocking writers flushing until dropped
#[derive(Debug, Default)]
pub struct LoggingGuard {
    _guards: Vec<WorkerGuard>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            json_format: false,
            log_directory: None,
            log_file_prefix: "assembly-line-sim".to_string(),
            enable_span_events: false,
            enable_ansi: true,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for the `--verbose` / `--debug` command line flags
    pub fn from_flags(verbose: bool, debug: bool) -> Self {
        match (debug, verbose) {
            (true, _) => Self::new().with_level(Level::DEBUG).with_span_events(),
            (false, true) => Self::new().with_level(Level::INFO),
            (false, false) => Self::new(),
        }
    }

    /// Set the log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Enable JSON formatting
    pub fn with_json_format(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Also write JSON logs to a daily rolling file in `directory`
    pub fn with_file_logging(mut self, directory: impl Into<String>) -> Self {
        self.log_directory = Some(directory.into());
        self
    }

    /// Set log file prefix
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_file_prefix = prefix.into();
        self
    }

    /// Enable span events
    pub fn with_span_events(mut self) -> Self {
        self.enable_span_events = true;
        self
    }

    /// Disable ANSI colors
    pub fn without_ansi(mut self) -> Self {
        self.enable_ansi = false;
        self
    }

    /// Set custom environment filter
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Filter directive used when neither `RUST_LOG` nor a custom filter is set
    pub fn default_directive(&self) -> String {
        format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), self.level)
    }

    fn span_events(&self) -> FmtSpan {
        if self.enable_span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn build_filter(&self) -> Result<EnvFilter, LoggingInitError> {
        match &self.env_filter {
            Some(filter) => Ok(EnvFilter::try_new(filter)?),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))),
        }
    }

    /// Install the global tracing subscriber
    ///
    /// The returned guard must live as long as logging is needed.
    pub fn init(self) -> Result<LoggingGuard, LoggingInitError> {
        let filter = self.build_filter()?;
        let mut guards = Vec::new();
        let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

        if self.json_format {
            layers.push(
                fmt::layer()
                    .json()
                    .with_writer(io::stderr)
                    .with_span_events(self.span_events())
                    .boxed(),
            );
        } else {
            layers.push(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_ansi(self.enable_ansi)
                    .with_target(false)
                    .with_span_events(self.span_events())
                    .boxed(),
            );
        }

        if let Some(directory) = &self.log_directory {
            let appender = rolling::daily(directory, &self.log_file_prefix);
            let (writer, guard) = non_blocking(appender);
            guards.push(guard);
            layers.push(
                fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_span_events(self.span_events())
                    .boxed(),
            );
        }

        tracing_subscriber::registry().with(layers).with(filter).try_init()?;

        debug!(level = %self.level, json = self.json_format, "Logging initialized");
        Ok(LoggingGuard { _guards: guards })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_creation() {
        let config = LoggingConfig::new();
        assert_eq!(config.level, Level::WARN);
        assert!(!config.json_format);
        assert!(config.log_directory.is_none());
        assert_eq!(config.log_file_prefix, "assembly-line-sim");
        assert!(!config.enable_span_events);
        assert!(config.enable_ansi);
        assert!(config.env_filter.is_none());
    }

    #[test]
    fn test_flags_select_level() {
        assert_eq!(LoggingConfig::from_flags(false, false).level, Level::WARN);
        assert_eq!(LoggingConfig::from_flags(true, false).level, Level::INFO);
        assert_eq!(LoggingConfig::from_flags(true, true).level, Level::DEBUG);
        assert!(LoggingConfig::from_flags(false, true).enable_span_events);
    }

    #[test]
    fn test_logging_config_builder_pattern() {
        let config = LoggingConfig::new()
            .with_level(Level::DEBUG)
            .with_json_format()
            .with_file_logging("test_logs")
            .with_file_prefix("test_prefix")
            .with_span_events()
            .without_ansi()
            .with_env_filter("debug");

        assert_eq!(config.level, Level::DEBUG);
        assert!(config.json_format);
        assert_eq!(config.log_directory, Some("test_logs".to_string()));
        assert_eq!(config.log_file_prefix, "test_prefix");
        assert!(config.enable_span_events);
        assert!(!config.enable_ansi);
        assert_eq!(config.env_filter, Some("debug".to_string()));
    }

    #[test]
    fn test_default_directive_targets_crate() {
        let directive = LoggingConfig::new().with_level(Level::INFO).default_directive();
        assert_eq!(directive, "assembly_line_sim=INFO");
    }

    #[test]
    fn test_invalid_custom_filter_is_rejected() {
        let config = LoggingConfig::new().with_env_filter("assembly_line_sim=loud");
        assert!(config.build_filter().is_err());
    }
}
