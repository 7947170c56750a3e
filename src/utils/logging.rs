//! Logging setup and trace sanitization.
//!
//! Configures the `tracing` ecosystem for the handler. The host calls
//! [`init`] once at startup; handler code only emits events. The
//! sanitizer keeps browser session cookie values out of log sinks.

use crate::config::LoggingConfig;
use crate::error::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber.
///
/// Supports two output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

/// Redacts Google session cookie values from a string before logging.
///
/// The web client authenticates with `__Secure-1PSID`/`__Secure-1PSIDTS`
/// browser cookies; their values are long-lived credentials and must not
/// reach log sinks.
pub fn sanitize(input: &str) -> String {
    let mut result = input.to_string();

    for cookie in ["__Secure-1PSIDTS=", "__Secure-1PSIDCC=", "__Secure-1PSID="] {
        let mut search_from = 0;
        while let Some(rel) = result[search_from..].find(cookie) {
            let start = search_from + rel + cookie.len();
            let end = result[start..]
                .find(|c: char| c.is_whitespace() || c == ';' || c == '"' || c == '\'')
                .map(|i| start + i)
                .unwrap_or(result.len());
            result.replace_range(start..end, "[REDACTED]");
            search_from = start + "[REDACTED]".len();
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_session_cookie() {
        let input = "Cookie: __Secure-1PSID=g.a000abc123def; other=1";
        let output = sanitize(input);
        assert!(output.contains("__Secure-1PSID=[REDACTED]"));
        assert!(!output.contains("g.a000abc123def"));
        assert!(output.contains("other=1"));
    }

    #[test]
    fn test_sanitize_timestamp_cookie() {
        let input = "__Secure-1PSIDTS=sidts-CjEB5sxnt token end";
        let output = sanitize(input);
        assert!(output.contains("__Secure-1PSIDTS=[REDACTED]"));
        assert!(!output.contains("sidts-CjEB5sxnt"));
    }

    #[test]
    fn test_sanitize_leaves_plain_text() {
        assert_eq!(sanitize("nothing secret here"), "nothing secret here");
    }
}
