//! Launcher data model
//!
//! Every invocation produces the same small set of values:
//! - `InvocationContext`: what the caller handed us
//! - `CompanionBinaryRef`: where the companion is expected to live
//! - `ChildExit`: how the companion finished
//! - `LaunchError`: why we never got that far

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Base name of the companion executable, without platform suffix.
pub const COMPANION_NAME: &str = "arbor";

/// Name of the distribution that ships both binaries (used in reinstall hints).
pub const DISTRIBUTION_NAME: &str = "arbor-cli";

/// Exit codes owned by the launcher itself.
///
/// Anything else the launcher exits with is the companion's own status.
pub mod exit_code {
    /// The companion binary is not where the installation put it.
    pub const MISSING_COMPANION: i32 = 1;
    /// The launcher could not work out where it lives, or lost track of its child.
    pub const LAUNCHER_FAILURE: i32 = 2;
    /// The companion exists but could not be executed.
    pub const COMPANION_UNUSABLE: i32 = 126;
    /// Base for "terminated by signal N" when the signal cannot be re-raised.
    pub const SIGNAL_BASE: i32 = 128;
}

/// Host operating system family, as far as binary naming is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Other,
}

impl Platform {
    /// Map an OS family identifier (`std::env::consts::FAMILY` style) to a platform.
    pub fn from_family(family: &str) -> Self {
        if family.eq_ignore_ascii_case("windows") {
            Platform::Windows
        } else {
            Platform::Other
        }
    }

    /// The platform this launcher was built for.
    pub fn host() -> Self {
        Self::from_family(std::env::consts::FAMILY)
    }

    /// Suffix appended to executable names on this platform.
    pub fn executable_suffix(self) -> &'static str {
        match self {
            Platform::Windows => ".exe",
            Platform::Other => "",
        }
    }
}

/// Everything a single run is allowed to know about its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    /// Arguments after the program name, untouched.
    pub args: Vec<OsString>,
    pub platform: Platform,
}

impl InvocationContext {
    pub fn new(args: Vec<OsString>, platform: Platform) -> Self {
        Self { args, platform }
    }

    /// Capture the real process arguments and host platform.
    pub fn capture() -> Self {
        Self::new(std::env::args_os().skip(1).collect(), Platform::host())
    }
}

/// Resolved location of the companion executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionBinaryRef {
    path: PathBuf,
}

impl CompanionBinaryRef {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for CompanionBinaryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// How the companion process terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildExit {
    /// Normal exit with a status code.
    Code(i32),
    /// Killed by a signal (Unix only).
    Signaled(i32),
}

impl ChildExit {
    /// Exit status the launcher should report when it cannot mirror the
    /// termination more faithfully.
    pub fn fallback_code(self) -> i32 {
        match self {
            ChildExit::Code(code) => code,
            ChildExit::Signaled(signal) => exit_code::SIGNAL_BASE + signal,
        }
    }
}

impl From<std::process::ExitStatus> for ChildExit {
    fn from(status: std::process::ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ChildExit::Code(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ChildExit::Signaled(signal);
            }
        }

        ChildExit::Code(exit_code::LAUNCHER_FAILURE)
    }
}

/// Kind of a directory entry that is present but not a regular file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    Special,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Directory => write!(f, "a directory"),
            EntryKind::Special => write!(f, "not a regular file"),
        }
    }
}

/// Every way a launch can fail before the companion gets to decide the exit status.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("{} binary not found at {}", COMPANION_NAME, .path.display())]
    MissingCompanion { path: PathBuf },

    #[error("failed to launch {} at {}: {}", COMPANION_NAME, .path.display(), .source)]
    Spawn { path: PathBuf, source: io::Error },

    #[error("failed to launch {} at {}: it is {}", COMPANION_NAME, .path.display(), .kind)]
    NotRegularFile { path: PathBuf, kind: EntryKind },

    #[error("failed to launch {} at {}: broken symbolic link ({})", COMPANION_NAME, .path.display(), .source)]
    BrokenLink { path: PathBuf, source: io::Error },

    #[error("failed to launch {} at {}: cannot inspect it ({})", COMPANION_NAME, .path.display(), .source)]
    Uninspectable { path: PathBuf, source: io::Error },

    #[error("failed to launch {} at {}: it resolves to this launcher", COMPANION_NAME, .path.display())]
    SelfDelegation { path: PathBuf },

    #[error("cannot determine the launcher's own location: {source}")]
    SelfLocation { source: io::Error },

    #[error("lost track of {} at {}: {}", COMPANION_NAME, .path.display(), .source)]
    Wait { path: PathBuf, source: io::Error },
}

impl LaunchError {
    /// Exit status the launcher terminates with for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::MissingCompanion { .. } => exit_code::MISSING_COMPANION,
            LaunchError::Spawn { .. }
            | LaunchError::NotRegularFile { .. }
            | LaunchError::BrokenLink { .. }
            | LaunchError::Uninspectable { .. }
            | LaunchError::SelfDelegation { .. } => exit_code::COMPANION_UNUSABLE,
            LaunchError::SelfLocation { .. } | LaunchError::Wait { .. } => {
                exit_code::LAUNCHER_FAILURE
            }
        }
    }

    /// Follow-up advice printed under the error line.
    pub fn hint(&self) -> String {
        match self {
            LaunchError::MissingCompanion { .. } => {
                format!("Please reinstall {DISTRIBUTION_NAME}.")
            }
            LaunchError::Spawn { .. }
            | LaunchError::NotRegularFile { .. }
            | LaunchError::BrokenLink { .. }
            | LaunchError::Uninspectable { .. }
            | LaunchError::SelfDelegation { .. } => format!(
                "The {COMPANION_NAME} installation appears to be broken. \
                 Check the file's permissions or reinstall {DISTRIBUTION_NAME}."
            ),
            LaunchError::SelfLocation { .. } | LaunchError::Wait { .. } => {
                "This is an environment problem rather than an installation problem.".to_string()
            }
        }
    }
}
