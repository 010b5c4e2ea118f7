//! Logging setup.
//!
//! Logs go to stderr so that stdout carries only command output (tables or
//! JSON).

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `debug`.
const LOG_ENV: &str = "SHQ_LOG";

/// Level used when neither `--verbose` nor `SHQ_LOG` is given.
const DEFAULT_LEVEL: &str = "warn";

/// Builds the log filter.
///
/// Precedence (highest to lowest):
///
/// 1. `--verbose` (debug)
/// 2. `SHQ_LOG`
/// 3. warnings only
fn build_filter(verbose: bool, env_directive: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    env_directive
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LEVEL))
}

/// Installs the global tracing subscriber.
///
/// If a subscriber is already set (tests, repeated calls) the error is
/// ignored and the first subscriber stays in place.
pub fn init_logging(verbose: bool) {
    let env_directive = std::env::var(LOG_ENV).ok();
    let filter = build_filter(verbose, env_directive.as_deref());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_wins() {
        assert_eq!(build_filter(true, Some("error")).to_string(), "debug");
    }

    #[test]
    fn test_env_directive() {
        assert_eq!(build_filter(false, Some("trace")).to_string(), "trace");
    }

    #[test]
    fn test_invalid_env_directive_falls_back() {
        assert_eq!(build_filter(false, Some("shq=loud")).to_string(), "warn");
    }

    #[test]
    fn test_default_level() {
        assert_eq!(build_filter(false, None).to_string(), "warn");
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging(false);
        init_logging(true);
    }
}
