use crate::utils::error::Result;
use std::path::Path;
use tempfile::TempDir;

pub const WORKDIR_PREFIX: &str = "push-transfer-";

/// Exclusively owned temporary directory for one transfer run.
///
/// Removed by [`WorkingDir::cleanup`], or on drop if a run unwinds before
/// reaching it.
#[derive(Debug)]
pub struct WorkingDir {
    dir: TempDir,
}

impl WorkingDir {
    pub fn create_in(parent: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(WORKDIR_PREFIX)
            .tempdir_in(parent)?;
        tracing::info!(path = %dir.path().display(), "Created working directory");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn cleanup(self) -> Result<()> {
        tracing::info!(path = %self.dir.path().display(), "Cleaning up working directory");
        self.dir.close()?;
        Ok(())
    }
}
