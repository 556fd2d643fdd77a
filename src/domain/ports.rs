use crate::domain::model::{ArchiveSummary, UploadReceipt, UploadTarget};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub trait Storage: Send + Sync {
    /// Uploads the file at `path` to `target`, replacing any existing object.
    fn put_file(
        &self,
        target: &UploadTarget,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<UploadReceipt>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn repo_url(&self) -> &str;
    fn branch(&self) -> &str;
    fn dir_path(&self) -> &str;
    fn target(&self) -> &UploadTarget;
}

/// The three stages of a transfer. Every path handed in lives inside the
/// engine's working directory.
#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Checks out the configured directory and returns its local path.
    async fn fetch(&self, workdir: &Path) -> Result<PathBuf>;
    async fn archive(&self, source: &Path, workdir: &Path) -> Result<ArchiveSummary>;
    async fn upload(&self, archive: &ArchiveSummary) -> Result<UploadReceipt>;
}
