//! Warden Logging
//!
//! Installs a `tracing` subscriber configured from the environment. The
//! library crates only emit `tracing` events; nothing is printed until the
//! host calls [`init`] or [`try_init`] (or installs its own subscriber).
//!
//! # Usage
//!
//! ```rust
//! use warden_log::{Format, Level, LogConfig};
//!
//! let config = LogConfig::default()
//!     .with_level(Level::Debug)
//!     .with_format(Format::Compact);
//!
//! // a second install in the same process fails, which is fine here
//! let _ = warden_log::try_init(&config);
//! tracing::debug!(field = "email", "validating");
//! ```
//!
//! # Environment Variables
//!
//! - `WARDEN_DEBUG=1` - Enable debug logging
//! - `WARDEN_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `WARDEN_LOG_FORMAT=pretty|json|compact` - Set output format
//! - `WARDEN_LOG_TIMESTAMPS=1|0` - Include timestamps
//! - `RUST_LOG` - Full filter directives, overriding the level

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

// ============================================================================
// Log Levels
// ============================================================================

/// Minimum level of emitted events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Trace level (most verbose)
    Trace,
    /// Debug level
    Debug,
    /// Info level
    Info,
    /// Warning level
    #[serde(alias = "warning")]
    Warn,
    /// Error level (least verbose)
    Error,
    /// Off (no logging)
    #[serde(alias = "none")]
    Off,
}

impl Level {
    /// Get level name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Off => "off",
        }
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "off" | "none" => Ok(Level::Off),
            _ => Err(LogError::UnknownLevel(s.to_string())),
        }
    }
}

impl From<Level> for LevelFilter {
    fn from(level: Level) -> Self {
        match level {
            Level::Trace => LevelFilter::TRACE,
            Level::Debug => LevelFilter::DEBUG,
            Level::Info => LevelFilter::INFO,
            Level::Warn => LevelFilter::WARN,
            Level::Error => LevelFilter::ERROR,
            Level::Off => LevelFilter::OFF,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Log Format
// ============================================================================

/// Output format for log messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Multi-line, human oriented
    Pretty,
    /// Compact single-line format
    Compact,
    /// JSON format for structured logging
    Json,
}

impl FromStr for Format {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Format::Pretty),
            "compact" => Ok(Format::Compact),
            "json" => Ok(Format::Json),
            _ => Err(LogError::UnknownFormat(s.to_string())),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Logging setup errors.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("unknown log level `{0}`")]
    UnknownLevel(String),

    #[error("unknown log format `{0}`")]
    UnknownFormat(String),

    #[error("invalid filter directive: {0}")]
    Filter(String),

    #[error("failed to install subscriber: {0}")]
    Init(String),
}

// ============================================================================
// Configuration
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Whether debug mode is enabled
    pub debug: bool,
    /// Minimum log level
    pub level: Level,
    /// Output format
    pub format: Format,
    /// Whether to include timestamps
    pub timestamps: bool,
    /// Whether to include the event target
    pub module_path: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Info,
            format: Format::Json,
            timestamps: true,
            module_path: true,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create config from any key lookup. Unparseable values fall back to
    /// the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| {
            lookup(key).map(|v| {
                let v = v.trim().to_lowercase();
                v == "1" || v == "true" || v == "yes"
            })
        };

        let debug = flag("WARDEN_DEBUG").unwrap_or(false);

        let level = lookup("WARDEN_LOG_LEVEL")
            .and_then(|s| s.parse().ok())
            .unwrap_or(if debug { Level::Debug } else { Level::Info });

        let format = lookup("WARDEN_LOG_FORMAT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(Format::Json);

        let timestamps = flag("WARDEN_LOG_TIMESTAMPS").unwrap_or(true);

        Self {
            debug,
            level,
            format,
            timestamps,
            module_path: true,
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    /// Effective level: debug mode never logs less than `Debug`
    pub fn effective_level(&self) -> Level {
        if self.debug {
            self.level.min(Level::Debug)
        } else {
            self.level
        }
    }

    /// Build the event filter. `RUST_LOG` wins when it is set.
    pub fn filter(&self) -> Result<EnvFilter, LogError> {
        match env::var(EnvFilter::DEFAULT_ENV) {
            Ok(directives) if !directives.trim().is_empty() => {
                EnvFilter::try_new(directives).map_err(|e| LogError::Filter(e.to_string()))
            }
            _ => {
                let level = LevelFilter::from(self.effective_level());
                Ok(EnvFilter::default().add_directive(level.into()))
            }
        }
    }

    fn fmt_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let layer = fmt::layer()
            .with_target(self.module_path)
            .with_writer(std::io::stderr);

        match (self.format, self.timestamps) {
            (Format::Json, true) => layer.json().boxed(),
            (Format::Json, false) => layer.json().without_time().boxed(),
            (Format::Compact, true) => layer.compact().boxed(),
            (Format::Compact, false) => layer.compact().without_time().boxed(),
            (Format::Pretty, true) => layer.pretty().boxed(),
            (Format::Pretty, false) => layer.pretty().without_time().boxed(),
        }
    }
}

// ============================================================================
// Initialization
// ============================================================================

/// Install a global subscriber configured from the environment.
///
/// Does nothing if a subscriber is already installed.
pub fn init() {
    let _ = try_init(&LogConfig::from_env());
}

/// Install a global subscriber for `config`.
pub fn try_init(config: &LogConfig) -> Result<(), LogError> {
    let filter = config.filter()?;

    tracing_subscriber::registry()
        .with(config.fmt_layer())
        .with(filter)
        .try_init()
        .map_err(|e| LogError::Init(e.to_string()))
}

// ============================================================================
// Tests
// ============================================================================
