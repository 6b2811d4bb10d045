//! Companion path resolution
//!
//! Resolution is a pure function of the launcher's installation directory and
//! the platform. It never looks at the working directory or `PATH`.

use std::path::{Path, PathBuf};

use crate::core::model::{CompanionBinaryRef, LaunchError, Platform, COMPANION_NAME};

/// File name the companion is installed under on `platform`.
pub fn companion_file_name(platform: Platform) -> String {
    format!("{}{}", COMPANION_NAME, platform.executable_suffix())
}

/// Build the candidate companion path inside `install_dir`.
pub fn resolve(install_dir: &Path, platform: Platform) -> CompanionBinaryRef {
    CompanionBinaryRef::new(install_dir.join(companion_file_name(platform)))
}

/// Directory that contains the given launcher executable path.
pub fn install_dir_of(launcher: &Path) -> Result<PathBuf, LaunchError> {
    launcher
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| LaunchError::SelfLocation {
            source: std::io::Error::other(format!(
                "launcher path {} has no parent directory",
                launcher.display()
            )),
        })
}

/// Absolute path of the running launcher, with symlinks resolved when possible.
pub fn current_launcher() -> Result<PathBuf, LaunchError> {
    let exe = std::env::current_exe().map_err(|source| LaunchError::SelfLocation { source })?;
    Ok(exe.canonicalize().unwrap_or(exe))
}
