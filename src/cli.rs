//! CLI module - Launcher state machine and process entry
//!
//! `Start → Resolved → Delegated → Exited(child)` on the happy path; every
//! failure ends in `Exited(code)` with a diagnostic on stderr. The launcher
//! reads no flags: the whole argument vector belongs to the companion.

use std::ffi::OsString;
use std::path::PathBuf;

use colored::Colorize;
use tracing::debug;

use crate::backends::probe::{HostProbe, Presence, Probe};
use crate::backends::spawn::{HostSpawner, Spawner};
use crate::core::config::LauncherConfig;
use crate::core::model::{
    ChildExit, CompanionBinaryRef, InvocationContext, LaunchError, Platform,
};
use crate::core::paths;

/// Delegates one invocation to the companion binary.
pub struct Launcher<P, S> {
    probe: P,
    spawner: S,
    /// The running launcher's own path, used to refuse self-delegation.
    self_path: Option<PathBuf>,
}

impl Launcher<HostProbe, HostSpawner> {
    pub fn host() -> Self {
        Self::new(HostProbe, HostSpawner)
    }
}

impl<P: Probe, S: Spawner> Launcher<P, S> {
    pub fn new(probe: P, spawner: S) -> Self {
        Self {
            probe,
            spawner,
            self_path: None,
        }
    }

    pub fn with_self_path(mut self, path: PathBuf) -> Self {
        self.self_path = Some(path);
        self
    }

    /// Check the companion and hand `args` to it unchanged.
    pub fn run(
        &self,
        companion: &CompanionBinaryRef,
        args: &[OsString],
    ) -> Result<ChildExit, LaunchError> {
        let path = companion.path();

        let presence = self.probe.probe(path);
        debug!(?presence, "probed companion");

        match presence {
            Presence::Regular => {}
            Presence::Missing => {
                return Err(LaunchError::MissingCompanion {
                    path: path.to_path_buf(),
                })
            }
            Presence::NotRegular(kind) => {
                return Err(LaunchError::NotRegularFile {
                    path: path.to_path_buf(),
                    kind,
                })
            }
            Presence::BrokenLink(source) => {
                return Err(LaunchError::BrokenLink {
                    path: path.to_path_buf(),
                    source,
                })
            }
            Presence::Uninspectable(source) => {
                return Err(LaunchError::Uninspectable {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }

        if let Some(self_path) = &self.self_path {
            if self.probe.same_file(path, self_path) {
                return Err(LaunchError::SelfDelegation {
                    path: path.to_path_buf(),
                });
            }
        }

        debug!(argc = args.len(), "delegating to companion");
        self.spawner.spawn_and_wait(path, args)
    }
}

/// Print a launch failure the way users see it.
pub fn report(err: &LaunchError) {
    eprintln!("{} {}", "error:".red().bold(), err);
    eprintln!("{} {}", "hint:".yellow(), err.hint());
}

/// Locate the running launcher and the companion that should sit next to it.
fn locate(platform: Platform) -> Result<(PathBuf, CompanionBinaryRef), LaunchError> {
    let launcher_path = paths::current_launcher()?;
    let install_dir = paths::install_dir_of(&launcher_path)?;
    Ok((launcher_path, paths::resolve(&install_dir, platform)))
}

/// Resolve and delegate for a real process; returns the exit status to use.
pub fn run(ctx: InvocationContext) -> i32 {
    let (launcher_path, companion) = match locate(ctx.platform) {
        Ok(found) => found,
        Err(err) => return fail(&err),
    };
    debug!(companion = %companion, "resolved companion binary");

    match Launcher::host()
        .with_self_path(launcher_path)
        .run(&companion, &ctx.args)
    {
        Ok(exit) => finish(exit),
        Err(err) => fail(&err),
    }
}

fn fail(err: &LaunchError) -> i32 {
    debug!(error = %err, "launch failed");
    report(err);
    err.exit_code()
}

/// Mirror the companion's termination as closely as the platform allows.
fn finish(exit: ChildExit) -> i32 {
    #[cfg(unix)]
    {
        if let ChildExit::Signaled(signal) = exit {
            crate::backends::signals::reraise(signal);
        }
    }

    exit.fallback_code()
}

/// Apply settings that affect how diagnostics look.
pub fn apply_config(config: &LauncherConfig) {
    colored::control::set_override(config.color);
}
