//! Backends module - Filesystem and process integrations
//!
//! Provides:
//! - probe: Companion presence checks
//! - spawn: Child process delegation
//! - signals: Terminal signal handling while the child runs (Unix)

pub mod probe;
pub mod spawn;

#[cfg(unix)]
pub mod signals;
