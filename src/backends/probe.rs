//! Probe - Companion presence checks
//!
//! The launcher only needs to know whether something usable sits at the
//! candidate path. Links are followed, so a dangling symlink or a symlink loop
//! is reported as broken rather than missing.

use std::fs;
use std::io;
use std::path::Path;

use crate::core::model::EntryKind;

/// What was found at a candidate path.
#[derive(Debug)]
pub enum Presence {
    /// Nothing at all.
    Missing,
    /// A regular file (possibly behind symlinks).
    Regular,
    /// A directory or special file.
    NotRegular(EntryKind),
    /// A symlink whose target cannot be reached.
    BrokenLink(io::Error),
    /// The entry exists but its metadata cannot be read.
    Uninspectable(io::Error),
}

/// Filesystem checks the launcher depends on.
pub trait Probe {
    fn probe(&self, path: &Path) -> Presence;

    /// Whether two paths name the same file.
    fn same_file(&self, a: &Path, b: &Path) -> bool;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostProbe;

impl Probe for HostProbe {
    fn probe(&self, path: &Path) -> Presence {
        match fs::symlink_metadata(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Presence::Missing,
            Err(e) => Presence::Uninspectable(e),
            Ok(link_meta) => match fs::metadata(path) {
                Ok(meta) if meta.is_file() => Presence::Regular,
                Ok(meta) if meta.is_dir() => Presence::NotRegular(EntryKind::Directory),
                Ok(_) => Presence::NotRegular(EntryKind::Special),
                Err(e) if link_meta.file_type().is_symlink() => Presence::BrokenLink(e),
                Err(e) => Presence::Uninspectable(e),
            },
        }
    }

    fn same_file(&self, a: &Path, b: &Path) -> bool {
        match (a.canonicalize(), b.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}
