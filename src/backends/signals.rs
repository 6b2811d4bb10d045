//! Terminal signal handling while the companion runs (Unix only)
//!
//! A terminal delivers SIGINT and SIGQUIT to the whole foreground process
//! group. While the companion is alive the launcher ignores both, so only the
//! companion reacts and the launcher stays around to report its status.
//!
//! The guard goes up before the spawn so no interrupt can land between the
//! child starting and the launcher ignoring it. The child gets the original
//! dispositions back in a `pre_exec` hook.

use std::os::unix::process::CommandExt;
use std::process::Command;

use nix::sys::signal::{raise, signal, SigHandler, Signal};

const TERMINAL_SIGNALS: [Signal; 2] = [Signal::SIGINT, Signal::SIGQUIT];

/// Ignores terminal signals in the launcher until dropped.
///
/// Ignored dispositions are inherited across `exec`, so any child spawned
/// while the guard is held must go through `restore_in_child`.
#[derive(Debug)]
pub struct TerminalSignalGuard {
    previous: Vec<(Signal, SigHandler)>,
}

impl TerminalSignalGuard {
    pub fn install() -> Self {
        let mut previous = Vec::with_capacity(TERMINAL_SIGNALS.len());

        for sig in TERMINAL_SIGNALS {
            // SAFETY: SIG_IGN runs no code in this process.
            match unsafe { signal(sig, SigHandler::SigIgn) } {
                Ok(handler) => previous.push((sig, handler)),
                Err(e) => tracing::debug!(signal = %sig, error = %e, "could not ignore signal"),
            }
        }

        Self { previous }
    }

    /// Make `cmd`'s child start with the dispositions in place before `install`.
    pub fn restore_in_child(&self, cmd: &mut Command) {
        let previous = self.previous.clone();
        let hook = move || -> std::io::Result<()> {
            for &(sig, handler) in &previous {
                // SAFETY: sigaction is async-signal-safe and the loop does not allocate.
                unsafe { signal(sig, handler) }?;
            }
            Ok(())
        };

        // SAFETY: the hook only calls sigaction between fork and exec.
        unsafe {
            cmd.pre_exec(hook);
        }
    }
}

impl Drop for TerminalSignalGuard {
    fn drop(&mut self) {
        for (sig, handler) in self.previous.drain(..) {
            // SAFETY: restores the disposition that was in place before `install`.
            if let Err(e) = unsafe { signal(sig, handler) } {
                tracing::debug!(signal = %sig, error = %e, "could not restore signal disposition");
            }
        }
    }
}

/// Terminate the launcher with the same signal that killed the companion.
///
/// Returns if the signal is unknown or its default action does not terminate
/// the process; the caller then exits with a numeric status instead.
pub fn reraise(signal_number: i32) {
    let Ok(sig) = Signal::try_from(signal_number) else {
        return;
    };

    // SAFETY: SIG_DFL runs no code in this process.
    if let Err(e) = unsafe { signal(sig, SigHandler::SigDfl) } {
        tracing::debug!(signal = %sig, error = %e, "could not reset signal disposition");
    }

    if let Err(e) = raise(sig) {
        tracing::debug!(signal = %sig, error = %e, "could not re-raise signal");
    }
}
