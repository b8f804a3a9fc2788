//! Subscriber setup for applications that do not install their own.
//!
//! Library code only emits `tracing` events. An application that wants to see
//! them without wiring up `tracing-subscriber` itself can call [`init`], which
//! reads its settings from the environment:
//!
//! - `JDBC_URL_DEBUG=true` / `1` / `yes` / `on` - enable debug output
//! - `JDBC_URL_LOG_LEVEL=trace|debug|info|warn|error` - explicit level
//! - `JDBC_URL_LOG_FORMAT=json|pretty|compact` - output format (default: json)
//!
//! Nothing is installed unless one of the first two is set. Installation
//! requires the `tracing-subscriber` feature; without it [`init`] only reads
//! the configuration.
//!
//! ```rust
//! use std::collections::HashMap;
//! use jdbc_url_core::logging::{LogConfig, LogFormat};
//!
//! let vars = HashMap::from([("JDBC_URL_DEBUG".to_string(), "1".to_string())]);
//! let config = LogConfig::from_source(&vars);
//!
//! assert!(config.enabled);
//! assert_eq!(config.format, LogFormat::Json);
//! assert_eq!(config.filter_directive(), "jdbc_url=debug,jdbc_url_core=debug");
//! ```

use std::fmt;
use std::sync::Once;

use tracing::Level;

use crate::env::{EnvSource, StdEnvSource};

/// Enables debug output when set to a true flag.
pub const DEBUG_VAR: &str = "JDBC_URL_DEBUG";

/// Explicit log level.
pub const LEVEL_VAR: &str = "JDBC_URL_LOG_LEVEL";

/// Output format.
pub const FORMAT_VAR: &str = "JDBC_URL_LOG_FORMAT";

/// Crates whose events the installed filter lets through.
const TARGETS: [&str; 2] = ["jdbc_url", "jdbc_url_core"];

static INIT: Once = Once::new();

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Multi-line, human readable.
    Pretty,
    /// Single line per event.
    Compact,
}

impl LogFormat {
    /// Parse a format name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" => Some(Self::Pretty),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }

    /// Get the format name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
            Self::Compact => "compact",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved logging settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    /// Whether [`init`] installs a subscriber at all.
    pub enabled: bool,
    /// Most verbose level let through for this crate's targets.
    pub level: Level,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: Level::WARN,
            format: LogFormat::Json,
        }
    }
}

impl LogConfig {
    /// Read the settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_source(&StdEnvSource)
    }

    /// Read the settings from any source.
    ///
    /// An unrecognized level falls back to `debug` when debug output is on
    /// and `warn` otherwise; an unrecognized format falls back to JSON.
    pub fn from_source<S: EnvSource + ?Sized>(source: &S) -> Self {
        let debug = source.flag(DEBUG_VAR);
        let explicit_level = source.get(LEVEL_VAR);
        let fallback = if debug { Level::DEBUG } else { Level::WARN };

        Self {
            enabled: debug || explicit_level.is_some(),
            level: explicit_level
                .as_deref()
                .and_then(parse_level)
                .unwrap_or(fallback),
            format: source
                .get(FORMAT_VAR)
                .as_deref()
                .and_then(LogFormat::from_name)
                .unwrap_or_default(),
        }
    }

    /// `EnvFilter` directive limiting output to this crate's targets.
    pub fn filter_directive(&self) -> String {
        let level = self.level.as_str().to_ascii_lowercase();
        TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Install a global subscriber built from these settings.
    ///
    /// Returns `false` when another global subscriber is already set; the
    /// host application keeps ownership in that case.
    #[cfg(feature = "tracing-subscriber")]
    pub fn install(&self) -> bool {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        let filter = EnvFilter::try_new(self.filter_directive())
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        let registry = tracing_subscriber::registry().with(filter);
        let installed = match self.format {
            LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
            LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
            LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
        }
        .is_ok();

        if installed {
            tracing::info!(level = %self.level, format = %self.format, "jdbc-url logging initialized");
        }
        installed
    }
}

fn parse_level(name: &str) -> Option<Level> {
    match name.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Install a subscriber configured from the environment. Subsequent calls
/// are no-ops.
pub fn init() {
    INIT.call_once(|| {
        let config = LogConfig::from_env();
        if !config.enabled {
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        config.install();
    });
}
