//! Executable resolution on the local file system.

use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::InvocationError;
use super::traits::ExecutableLocator;
use crate::config::BinariesConfig;

/// Finds executables through explicit overrides, configured directories and
/// finally the `PATH` environment variable.
///
/// Nothing is downloaded; a tool that is not installed is a launch failure.
#[derive(Debug, Clone, Default)]
pub struct PathLocator {
    config: BinariesConfig,
}

impl PathLocator {
    /// Creates a locator from the `[binaries]` configuration.
    pub fn new(config: BinariesConfig) -> Self {
        Self { config }
    }

    fn candidate(dir: &Path, name: &str) -> Option<PathBuf> {
        let path = dir.join(format!("{}{}", name, std::env::consts::EXE_SUFFIX));
        if is_executable(&path) {
            Some(path)
        } else {
            if path.is_file() {
                debug!("Skipping non-executable {:?}", path);
            }
            None
        }
    }

    fn search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = self.config.bin_dirs.clone();
        if self.config.search_path {
            if let Some(path) = std::env::var_os("PATH") {
                dirs.extend(std::env::split_paths(&path));
            }
        }
        dirs
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

impl ExecutableLocator for PathLocator {
    fn locate(&self, name: &str) -> Result<PathBuf, InvocationError> {
        if let Some(path) = self.config.paths.get(name) {
            if is_executable(path) {
                return Ok(path.clone());
            }
            return Err(InvocationError::launch_failure(
                name,
                format!("configured path {} is not an executable file", path.display()),
            ));
        }

        let found = self
            .search_dirs()
            .iter()
            .find_map(|dir| Self::candidate(dir, name));

        match found {
            Some(path) => {
                debug!("Resolved {} to {:?}", name, path);
                Ok(path)
            }
            None => Err(InvocationError::launch_failure(
                name,
                "executable not found",
            )),
        }
    }
}
