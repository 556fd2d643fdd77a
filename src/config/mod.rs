#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::s3::StorageSettings;
use crate::core::ConfigProvider;
use crate::domain::model::UploadTarget;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

pub const DEFAULT_REPO_URL: &str = "https://github.com/artefactual/archivematica-sampledata.git";
pub const DEFAULT_BRANCH: &str = "master";
pub const DEFAULT_DIR_PATH: &str = "SampleTransfers/Images/pictures";
pub const DEFAULT_ENDPOINT: &str = "localhost:7460";
// Credentials of the local development MinIO instance.
pub const DEFAULT_ACCESS_KEY: &str = "minio";
pub const DEFAULT_SECRET_KEY: &str = "minio123";
pub const DEFAULT_TARGET: &str = "sips/transfer.zip";
pub const DEFAULT_REGION: &str = "us-east-1";

/// Fully resolved settings for one transfer run.
#[derive(Debug, Clone)]
pub struct TransferConfig {
    pub repo_url: String,
    pub branch: String,
    pub dir_path: String,
    pub target: UploadTarget,
    pub storage: StorageSettings,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            repo_url: DEFAULT_REPO_URL.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            dir_path: DEFAULT_DIR_PATH.to_string(),
            target: UploadTarget {
                bucket: "sips".to_string(),
                key: "transfer.zip".to_string(),
            },
            storage: StorageSettings {
                endpoint: DEFAULT_ENDPOINT.to_string(),
                access_key: DEFAULT_ACCESS_KEY.to_string(),
                secret_key: DEFAULT_SECRET_KEY.to_string(),
                secure: false,
                region: DEFAULT_REGION.to_string(),
            },
        }
    }
}

impl ConfigProvider for TransferConfig {
    fn repo_url(&self) -> &str {
        &self.repo_url
    }

    fn branch(&self) -> &str {
        &self.branch
    }

    fn dir_path(&self) -> &str {
        &self.dir_path
    }

    fn target(&self) -> &UploadTarget {
        &self.target
    }
}

impl Validate for TransferConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("repo_url", &self.repo_url)?;
        validation::validate_branch("branch", &self.branch)?;
        validation::validate_relative_path("dir_path", &self.dir_path)?;

        validation::validate_url("minio_endpoint", &self.storage.endpoint_url())?;
        validation::validate_non_empty_string("access_key", &self.storage.access_key)?;
        validation::validate_non_empty_string("secret_key", &self.storage.secret_key)?;
        validation::validate_non_empty_string("region", &self.storage.region)?;

        validation::validate_s3_bucket_name("minio_target", &self.target.bucket)?;

        if !self.storage.secure {
            tracing::warn!(
                endpoint = %self.storage.endpoint,
                "Object storage transport is plaintext; pass --secure for TLS"
            );
        }
        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}
