//! # Logger
//!
//! Installs the process-wide `tracing` subscriber for a Keel host:
//! a compact console layer, an optional non-blocking rolling log file, and an
//! [`EnvFilter`] seeded from the configured level (`RUST_LOG` still applies).
//!
//! ```rust,no_run
//! use keel_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder()
//!     .name("keel-host")
//!     .level(LevelFilter::DEBUG)
//!     .env_filter("keel_container=trace")
//!     .init()?;
//! # Ok::<(), keel_logger::LoggerError>(())
//! ```
//!
//! Hosts that read [`LoggingConfig`] can apply it in one step with
//! [`LoggerBuilder::configure`].

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use keel_domain::config::LoggingConfig;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

/// Configures the global subscriber. Obtain one with [`Logger::builder`].
#[derive(Debug)]
pub struct LoggerBuilder {
    name: Option<String>,
    console: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    env_filter: Option<String>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            name: None,
            console: true,
            path: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            env_filter: None,
        }
    }
}

impl LoggerBuilder {
    /// Identifies the process; also the prefix of rolling log files (`<name>.<date>.log`).
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Adds explicit filter directives, e.g. `keel_discovery=debug,keel_container=trace`.
    /// An invalid directive makes [`LoggerBuilder::init`] fail.
    #[must_use]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Writes a rolling log file into `path`, creating the directory if needed.
    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    /// Formats the log file as JSON lines. The console stays human-readable.
    #[must_use]
    pub const fn json(mut self) -> Self {
        self.json = true;
        self
    }

    /// Applies the `logging` configuration section.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] if `level` is not a valid level name.
    pub fn configure(mut self, config: &LoggingConfig) -> Result<Self, LoggerError> {
        self.level = config
            .level
            .parse()
            .map_err(|_| LoggerError::invalid(format!("Unknown log level '{}'", config.level)))?;
        if let Some(directory) = &config.directory {
            self.path = Some(directory.clone());
        }
        if let Some(filter) = &config.filter {
            self.env_filter = Some(filter.clone());
        }
        self.json |= config.json;
        Ok(self)
    }

    /// Installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive: it owns the file writer's worker guard.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for a missing name, `max_files == 0`,
    ///   an invalid filter, or when no output is enabled.
    /// * [`LoggerError::Appender`] if the log file cannot be opened.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let name = self.validate()?;
        let env_filter = self.build_env_filter()?;

        let mut layers = Vec::new();
        if self.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = if let Some(path) = &self.path {
            fs::create_dir_all(path).map_err(|e| LoggerError::Internal {
                message: e.to_string().into(),
                context: Some(format!("Failed to create log directory {}", path.display()).into()),
            })?;

            let appender = RollingFileAppender::builder()
                .rotation(self.rotation.clone())
                .filename_prefix(&name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(self.max_files)
                .build(path)
                .context(path.display().to_string())?;

            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = layer().with_writer(writer).with_ansi(false);
            layers.push(if self.json { file_layer.json().boxed() } else { file_layer.boxed() });
            Some(guard)
        } else {
            None
        };

        if layers.is_empty() {
            return Err(LoggerError::invalid("No output enabled; enable the console or a log path"));
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger { name, guard })
    }

    fn validate(&self) -> Result<String, LoggerError> {
        let name = self.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(LoggerError::invalid("Logger name cannot be empty"));
        }
        if self.max_files == 0 {
            return Err(LoggerError::invalid("max_files must be greater than zero"));
        }
        Ok(name.to_owned())
    }

    fn build_env_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.env_filter {
            None => Ok(builder.from_env_lossy()),
            Some(filter) => builder
                .parse(filter)
                .map_err(|e| LoggerError::invalid(format!("Invalid filter '{filter}': {e}"))),
        }
    }
}

/// Handle to the installed subscriber. Dropping it flushes and stops the file writer.
#[must_use = "Dropping this handle stops the background log writer."]
#[derive(Debug)]
pub struct Logger {
    name: String,
    guard: Option<WorkerGuard>,
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The file writer's guard, present only when a log path was configured.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!(name = %self.name, "Flushing log file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = Logger::builder();
        assert!(builder.console);
        assert!(!builder.json);
        assert_eq!(builder.level, LevelFilter::INFO);
        assert!(builder.path.is_none());
    }

    #[test]
    fn test_configure_applies_section() {
        let config = LoggingConfig {
            level: "debug".to_owned(),
            directory: Some(PathBuf::from("logs")),
            json: true,
            filter: Some("keel=trace".to_owned()),
        };

        let builder = Logger::builder().configure(&config).expect("valid section");
        assert_eq!(builder.level, LevelFilter::DEBUG);
        assert_eq!(builder.path, Some(PathBuf::from("logs")));
        assert_eq!(builder.env_filter.as_deref(), Some("keel=trace"));
        assert!(builder.json);
    }

    #[test]
    fn test_configure_rejects_unknown_level() {
        let config = LoggingConfig { level: "loud".to_owned(), ..LoggingConfig::default() };
        let error = Logger::builder().configure(&config).expect_err("invalid level");
        assert!(matches!(error, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_invalid_settings_fail_before_install() {
        assert!(matches!(Logger::builder().init(), Err(LoggerError::InvalidConfiguration { .. })));
        assert!(matches!(
            Logger::builder().name("x").max_files(0).init(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            Logger::builder().name("x").console(false).init(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            Logger::builder().name("x").env_filter("keel=loudest").init(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }
}
