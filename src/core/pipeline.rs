use crate::adapters::{archive, git::SparseCheckout};
use crate::core::{ArchiveSummary, ConfigProvider, Pipeline, Storage, UploadReceipt};
use crate::utils::error::{Result, TransferError};
use std::path::{Path, PathBuf};

pub const STAGING_DIR: &str = "staging";
pub const ARCHIVE_NAME: &str = "archive.zip";

pub struct TransferPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> TransferPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for TransferPipeline<S, C> {
    async fn fetch(&self, workdir: &Path) -> Result<PathBuf> {
        let staging = workdir.join(STAGING_DIR);
        let checkout = SparseCheckout {
            repo_url: self.config.repo_url(),
            branch: self.config.branch(),
            dir_path: self.config.dir_path(),
        };
        checkout.run(&staging).await?;

        let source = staging.join(self.config.dir_path());
        if !source.is_dir() {
            return Err(TransferError::PathNotFound {
                path: self.config.dir_path().to_string(),
                branch: self.config.branch().to_string(),
            });
        }
        Ok(source)
    }

    async fn archive(&self, source: &Path, workdir: &Path) -> Result<ArchiveSummary> {
        archive::zip_folder(source, &workdir.join(ARCHIVE_NAME))
    }

    async fn upload(&self, archive: &ArchiveSummary) -> Result<UploadReceipt> {
        if archive.entries == 0 || archive.bytes == 0 {
            return Err(TransferError::EmptyArchive {
                path: archive.path.display().to_string(),
            });
        }
        self.storage
            .put_file(self.config.target(), &archive.path)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::UploadTarget;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                objects: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_object(&self, target: &str) -> Option<Vec<u8>> {
            self.objects.lock().await.get(target).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn put_file(&self, target: &UploadTarget, path: &Path) -> Result<UploadReceipt> {
            let data = std::fs::read(path)?;
            let bytes = data.len() as u64;
            self.objects.lock().await.insert(target.to_string(), data);
            Ok(UploadReceipt {
                bucket: target.bucket.clone(),
                key: target.key.clone(),
                bytes,
                e_tag: None,
            })
        }
    }

    struct MockConfig {
        dir_path: String,
        target: UploadTarget,
    }

    impl MockConfig {
        fn new(target: &str) -> Self {
            Self {
                dir_path: "images/pictures".to_string(),
                target: UploadTarget::parse(target).unwrap(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn repo_url(&self) -> &str {
            "file:///nonexistent"
        }

        fn branch(&self) -> &str {
            "master"
        }

        fn dir_path(&self) -> &str {
            &self.dir_path
        }

        fn target(&self) -> &UploadTarget {
            &self.target
        }
    }

    #[tokio::test]
    async fn test_archive_writes_into_workdir() {
        let workdir = tempfile::tempdir().unwrap();
        let source = workdir.path().join(STAGING_DIR).join("images/pictures");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::write(source.join("cat.jpg"), b"meow").unwrap();

        let pipeline = TransferPipeline::new(MockStorage::new(), MockConfig::new("sips/t.zip"));
        let summary = pipeline.archive(&source, workdir.path()).await.unwrap();

        assert_eq!(summary.path, workdir.path().join(ARCHIVE_NAME));
        assert_eq!(summary.entries, 1);
        assert!(summary.bytes > 0);
    }

    #[tokio::test]
    async fn test_upload_sends_archive_to_target() {
        let workdir = tempfile::tempdir().unwrap();
        let source = workdir.path().join("pictures");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::write(source.join("dog.jpg"), b"woof").unwrap();

        let storage = MockStorage::new();
        let pipeline = TransferPipeline::new(
            storage.clone(),
            MockConfig::new("sips/path/to/transfer.zip"),
        );
        let summary = pipeline.archive(&source, workdir.path()).await.unwrap();
        let receipt = pipeline.upload(&summary).await.unwrap();

        assert_eq!(receipt.bucket, "sips");
        assert_eq!(receipt.key, "path/to/transfer.zip");
        assert_eq!(receipt.bytes, summary.bytes);

        let stored = storage.get_object("sips/path/to/transfer.zip").await.unwrap();
        assert_eq!(stored, std::fs::read(&summary.path).unwrap());
    }

    #[tokio::test]
    async fn test_upload_refuses_empty_archive() {
        let storage = MockStorage::new();
        let pipeline = TransferPipeline::new(storage.clone(), MockConfig::new("sips/t.zip"));
        let summary = ArchiveSummary {
            path: PathBuf::from("/nowhere/archive.zip"),
            entries: 0,
            bytes: 0,
        };

        let err = pipeline.upload(&summary).await.unwrap_err();
        assert!(matches!(err, TransferError::EmptyArchive { .. }));
        assert!(storage.get_object("sips/t.zip").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_from_missing_repository_fails() {
        let workdir = tempfile::tempdir().unwrap();
        let pipeline = TransferPipeline::new(MockStorage::new(), MockConfig::new("sips/t.zip"));

        let err = pipeline.fetch(workdir.path()).await.unwrap_err();
        assert!(matches!(err, TransferError::Git { .. }));
    }
}
