//! Launcher settings
//!
//! The launcher owns no flags: every argument belongs to the companion. What
//! little it can be told comes from the environment.

use std::io::IsTerminal;

/// Environment variable holding a `tracing` filter directive for the launcher.
pub const LOG_ENV: &str = "ARBOR_LOG";

/// Conventional opt-out for colored output.
pub const NO_COLOR_ENV: &str = "NO_COLOR";

/// Filter used when `ARBOR_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    /// Log filter directive, if one was supplied.
    pub log_filter: Option<String>,
    /// Whether diagnostics on stderr may use ANSI colors.
    pub color: bool,
}

impl LauncherConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(
            |key| std::env::var(key).ok(),
            std::io::stderr().is_terminal(),
        )
    }

    /// Build settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F, stderr_is_terminal: bool) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_filter = lookup(LOG_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        // Any value, even empty, disables color (https://no-color.org).
        let no_color = lookup(NO_COLOR_ENV).is_some();

        Self {
            log_filter,
            color: stderr_is_terminal && !no_color,
        }
    }

    /// Filter directive to hand to the subscriber.
    pub fn effective_log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}
