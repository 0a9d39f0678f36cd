//! Logging initialization for the CLI.

use std::sync::OnceLock;

static INIT: OnceLock<()> = OnceLock::new();

pub const LOG_ENV_VAR: &str = "NPM_CI_AUTH_LOG";

fn parse_level(value: Option<&str>) -> tracing::Level {
    match value
        .map(str::trim)
        .unwrap_or_default()
        .to_ascii_lowercase()
        .as_str()
    {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::WARN,
    }
}

/// Initialize stderr tracing output from `NPM_CI_AUTH_LOG`.
///
/// Safe to call more than once; only the first call installs a subscriber.
/// Stdout is left for the command's own output.
pub fn init() {
    if INIT.get().is_some() {
        return;
    }
    let level = parse_level(std::env::var(LOG_ENV_VAR).ok().as_deref());
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
    let _ = INIT.set(());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(Some("debug")), tracing::Level::DEBUG);
        assert_eq!(parse_level(Some(" TRACE ")), tracing::Level::TRACE);
        assert_eq!(parse_level(Some("info")), tracing::Level::INFO);
        assert_eq!(parse_level(Some("warn")), tracing::Level::WARN);
        assert_eq!(parse_level(Some("error")), tracing::Level::ERROR);
    }

    #[test]
    fn test_parse_level_defaults_to_warn() {
        assert_eq!(parse_level(None), tracing::Level::WARN);
        assert_eq!(parse_level(Some("loud")), tracing::Level::WARN);
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
