//! Logging setup for the `bookstore` binary.
//!
//! Log records go to stderr so they never interleave with the walkthrough on stdout.
//!
//! # Environment Variables
//!
//! - `BOOKSTORE_DEBUG=true` (or `1`, `yes`) - Enable debug logging
//! - `BOOKSTORE_LOG_LEVEL=trace|debug|info|warn|error` - Set a specific log level
//! - `BOOKSTORE_LOG_FORMAT=json|pretty|compact` - Set output format (default: compact)
//!
//! Inside the crates, use the standard tracing macros:
//!
//! ```rust,ignore
//! use tracing::{debug, info, warn};
//!
//! info!(database = %name, "MongoDB client created");
//! debug!(genre = %genre, "find_by_genre");
//! warn!(keys = %keys, error = %e, "index may already exist");
//! ```

use std::env;
use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Enables debug logging when truthy.
pub const DEBUG_VAR: &str = "BOOKSTORE_DEBUG";

/// Overrides the log level.
pub const LEVEL_VAR: &str = "BOOKSTORE_LOG_LEVEL";

/// Selects the output format.
pub const FORMAT_VAR: &str = "BOOKSTORE_LOG_FORMAT";

/// Output format for log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    /// Parse a format name. Unknown or missing names fall back to compact.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::to_lowercase).as_deref() {
            Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Json => "json",
            LogFormat::Pretty => "pretty",
            LogFormat::Compact => "compact",
        }
    }
}

/// Whether a `BOOKSTORE_DEBUG` value turns debug logging on.
pub fn is_truthy(value: Option<&str>) -> bool {
    value
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Resolve the effective level from the raw `BOOKSTORE_DEBUG` and `BOOKSTORE_LOG_LEVEL` values.
///
/// An explicit valid level wins. Otherwise debug mode means `debug`, and the default is `warn`.
pub fn resolve_level(debug: Option<&str>, level: Option<&str>) -> &'static str {
    let explicit = level.and_then(|l| match l.to_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    });

    match explicit {
        Some(level) => level,
        None if is_truthy(debug) => "debug",
        None => "warn",
    }
}

/// Directive string for the bookstore crates and the driver.
pub fn filter_directives(level: &str) -> String {
    format!(
        "bookstore={},bookstore_cli={},bookstore_mongodb={},mongodb=warn",
        level, level, level
    )
}

/// Check if debug logging is enabled via `BOOKSTORE_DEBUG`.
pub fn is_debug_enabled() -> bool {
    is_truthy(env::var(DEBUG_VAR).ok().as_deref())
}

/// The configured log level.
pub fn log_level() -> &'static str {
    resolve_level(
        env::var(DEBUG_VAR).ok().as_deref(),
        env::var(LEVEL_VAR).ok().as_deref(),
    )
}

/// The configured log format.
pub fn log_format() -> LogFormat {
    LogFormat::parse(env::var(FORMAT_VAR).ok().as_deref())
}

/// Install the global subscriber. Subsequent calls are no-ops.
pub fn init() {
    INIT.call_once(|| {
        let level = log_level();
        let format = log_format();
        let filter = EnvFilter::try_new(filter_directives(level))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        let registry = tracing_subscriber::registry().with(filter);
        let result = match format {
            LogFormat::Json => registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init(),
            LogFormat::Pretty => registry
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init(),
            LogFormat::Compact => registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .try_init(),
        };

        if result.is_ok() {
            tracing::debug!(level, format = format.as_str(), "logging initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_values() {
        assert!(is_truthy(Some("true")));
        assert!(is_truthy(Some("1")));
        assert!(is_truthy(Some("YES")));
        assert!(!is_truthy(Some("false")));
        assert!(!is_truthy(Some("")));
        assert!(!is_truthy(None));
    }

    #[test]
    fn test_resolve_level() {
        assert_eq!(resolve_level(None, None), "warn");
        assert_eq!(resolve_level(Some("1"), None), "debug");
        assert_eq!(resolve_level(None, Some("INFO")), "info");
        assert_eq!(resolve_level(Some("true"), Some("error")), "error");
        assert_eq!(resolve_level(Some("true"), Some("loud")), "debug");
        assert_eq!(resolve_level(None, Some("loud")), "warn");
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(LogFormat::parse(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some("Pretty")), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(Some("compact")), LogFormat::Compact);
        assert_eq!(LogFormat::parse(Some("xml")), LogFormat::Compact);
        assert_eq!(LogFormat::parse(None), LogFormat::Compact);
    }

    #[test]
    fn test_filter_directives() {
        let directives = filter_directives("debug");
        assert!(directives.contains("bookstore_mongodb=debug"));
        assert!(directives.ends_with("mongodb=warn"));
        assert!(EnvFilter::try_new(directives).is_ok());
    }
}
