//! Spawn - Companion process delegation
//!
//! Starts the companion with the caller's arguments exactly as received and
//! inherited stdio, then blocks until it exits.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::core::model::{ChildExit, LaunchError};

/// Process creation as seen by the launcher.
pub trait Spawner {
    /// Run `program` with `args`, wait for it, and report how it ended.
    fn spawn_and_wait(&self, program: &Path, args: &[OsString]) -> Result<ChildExit, LaunchError>;
}

/// Spawner backed by `std::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostSpawner;

impl Spawner for HostSpawner {
    fn spawn_and_wait(&self, program: &Path, args: &[OsString]) -> Result<ChildExit, LaunchError> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        #[cfg(unix)]
        let guard = crate::backends::signals::TerminalSignalGuard::install();
        #[cfg(unix)]
        {
            guard.restore_in_child(&mut cmd);
        }

        let mut child = cmd.spawn().map_err(|source| LaunchError::Spawn {
            path: program.to_path_buf(),
            source,
        })?;
        debug!(pid = child.id(), "companion started");

        let status = child.wait().map_err(|source| LaunchError::Wait {
            path: program.to_path_buf(),
            source,
        });

        #[cfg(unix)]
        {
            drop(guard);
        }

        let exit = ChildExit::from(status?);
        debug!(?exit, "companion finished");
        Ok(exit)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_spawn_reports_exit_code() {
        let exit = HostSpawner
            .spawn_and_wait(
                Path::new("/bin/sh"),
                &[OsString::from("-c"), OsString::from("exit 7")],
            )
            .unwrap();
        assert_eq!(exit, ChildExit::Code(7));
    }

    #[test]
    #[serial]
    fn test_spawn_reports_signal() {
        let exit = HostSpawner
            .spawn_and_wait(
                Path::new("/bin/sh"),
                &[OsString::from("-c"), OsString::from("kill -TERM $$")],
            )
            .unwrap();
        assert_eq!(exit, ChildExit::Signaled(15));
    }

    #[test]
    #[serial]
    fn test_child_starts_with_interrupt_not_ignored() {
        let exit = HostSpawner
            .spawn_and_wait(
                Path::new("/bin/sh"),
                &[OsString::from("-c"), OsString::from("kill -INT $$; exit 0")],
            )
            .unwrap();
        assert_eq!(exit, ChildExit::Signaled(2));
    }

    #[test]
    #[serial]
    fn test_spawn_failure_is_spawn_error() {
        let temp = tempfile::tempdir().unwrap();
        let err = HostSpawner
            .spawn_and_wait(temp.path(), &[])
            .unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
        assert_eq!(err.exit_code(), 126);
    }
}
