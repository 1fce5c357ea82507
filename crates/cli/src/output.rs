//! Output files that only appear once a conversion has succeeded.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tokio::fs::File;

/// A temporary file next to the destination, renamed over it on commit.
///
/// Dropping it without committing removes the temporary file and leaves any
/// existing destination untouched.
pub struct StagedOutput {
    temp: NamedTempFile,
    dest: PathBuf,
}

impl StagedOutput {
    /// Creates the staging file and a writer into it.
    pub fn create(dest: &Path) -> Result<(Self, File)> {
        let dir = match dest.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create a temporary file in {:?}", dir))?;
        let writer = temp
            .reopen()
            .with_context(|| format!("Failed to open {:?}", temp.path()))?;

        Ok((
            Self {
                temp,
                dest: dest.to_path_buf(),
            },
            File::from_std(writer),
        ))
    }

    /// Moves the staged bytes to the destination.
    pub fn commit(self) -> Result<()> {
        let dest = self.dest;
        self.temp
            .persist(&dest)
            .with_context(|| format!("Failed to write {:?}", dest))?;
        Ok(())
    }
}
