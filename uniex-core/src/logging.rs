//! Structured logging setup.
//!
//! Thin wrappers over `tracing-subscriber`: pick a level and format, get an
//! env-filter-aware subscriber. `RUST_LOG` overrides the configured level
//! when set.

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Most detailed tracing output.
    Trace,
    /// Detailed debugging information.
    Debug,
    /// Business-level events.
    Info,
    /// Potential issues.
    Warn,
    /// Failures.
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{s}")
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    Pretty,
    /// Single-line output.
    Compact,
    /// JSON lines for log pipelines.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum level, unless `RUST_LOG` overrides.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
    /// Include thread ids.
    pub show_thread_ids: bool,
    /// Include the target module path.
    pub show_target: bool,
    /// Emit span enter/close events.
    pub show_span_events: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            show_thread_ids: false,
            show_target: true,
            show_span_events: false,
        }
    }
}

impl LogConfig {
    /// Verbose pretty output for local development.
    pub fn development() -> Self {
        Self {
            level: LogLevel::Debug,
            format: LogFormat::Pretty,
            show_thread_ids: false,
            show_target: true,
            show_span_events: true,
        }
    }

    /// JSON output for production log pipelines.
    pub fn production() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Json,
            show_thread_ids: true,
            show_target: true,
            show_span_events: false,
        }
    }

    /// Quiet compact output for test runs.
    pub fn test() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Compact,
            show_thread_ids: false,
            show_target: false,
            show_span_events: false,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "uniex_core={level},uniex_exchanges={level}",
                level = self.level
            ))
        })
    }

    fn span_events(&self) -> FmtSpan {
        if self.show_span_events {
            FmtSpan::ENTER | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Initialize logging, panicking if a global subscriber is already set.
pub fn init_logging(config: &LogConfig) {
    build_and_init(config, false);
}

/// Initialize logging, ignoring an already-set global subscriber. Safe to
/// call from every test.
pub fn try_init_logging(config: &LogConfig) {
    build_and_init(config, true);
}

fn build_and_init(config: &LogConfig, lenient: bool) {
    let filter = config.env_filter();
    let base = fmt::layer()
        .with_thread_ids(config.show_thread_ids)
        .with_target(config.show_target)
        .with_span_events(config.span_events());

    // The three formatters produce distinct layer types, so each arm builds
    // its own registry.
    match config.format {
        LogFormat::Pretty => {
            let registry =
                tracing_subscriber::registry().with(base.pretty().with_filter(filter));
            if lenient {
                let _ = registry.try_init();
            } else {
                registry.init();
            }
        }
        LogFormat::Compact => {
            let registry =
                tracing_subscriber::registry().with(base.compact().with_filter(filter));
            if lenient {
                let _ = registry.try_init();
            } else {
                registry.init();
            }
        }
        LogFormat::Json => {
            let registry = tracing_subscriber::registry().with(base.json().with_filter(filter));
            if lenient {
                let _ = registry.try_init();
            } else {
                registry.init();
            }
        }
    }
}
