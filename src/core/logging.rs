//! Logging setup
//!
//! Launcher events go to stderr through `tracing`. At the default `warn` level
//! nothing on the normal path is printed, so the companion's output is left alone.

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::core::config::{LauncherConfig, DEFAULT_LOG_FILTER};

/// Parse the configured filter, falling back to the default on bad input.
pub fn build_filter(config: &LauncherConfig) -> EnvFilter {
    EnvFilter::try_new(config.effective_log_filter())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global subscriber.
pub fn init(config: &LauncherConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .with_writer(std::io::stderr)
        .with_ansi(config.color)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!(e))
        .context("failed to install log subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(filter: Option<&str>) -> LauncherConfig {
        LauncherConfig {
            log_filter: filter.map(str::to_string),
            color: false,
        }
    }

    #[test]
    fn test_build_filter_default() {
        let filter = build_filter(&config_with(None));
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn test_build_filter_custom() {
        let filter = build_filter(&config_with(Some("debug")));
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_build_filter_invalid_falls_back() {
        let filter = build_filter(&config_with(Some("[[not a directive")));
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn test_init_twice_reports_error() {
        let config = config_with(Some("off"));
        // Whichever call installs the subscriber, a later one must be refused.
        let _ = init(&config);
        assert!(tracing::dispatcher::has_been_set());
        assert!(init(&config).is_err());
    }
}
