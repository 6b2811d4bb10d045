//! arbor-cli - launcher for the arbor directory tree viewer
//!
//! arbor-cli:
//! - Finds the `arbor` binary installed next to itself
//! - Runs it with the exact arguments it was given, on inherited stdio
//! - Exits with arbor's own exit status
//!
//! Launcher-owned exit codes: `1` arbor not installed, `126` arbor installed
//! but not runnable, `2` the launcher cannot locate itself.

mod backends;
mod cli;
mod core;

use crate::core::config::LauncherConfig;
use crate::core::model::InvocationContext;

fn main() {
    let config = LauncherConfig::from_env();
    cli::apply_config(&config);

    if let Err(e) = crate::core::logging::init(&config) {
        eprintln!("warning: {e:#}");
    }

    let code = cli::run(InvocationContext::capture());
    std::process::exit(code);
}
