use crate::utils::error::{Result, TransferError};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Optional configuration file. Every key may be omitted; flags given on the
/// command line take precedence over values here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub repository: RepositoryConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    pub url: Option<String>,
    pub branch: Option<String>,
    pub dir_path: Option<String>,
}

#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub target: Option<String>,
    pub secure: Option<bool>,
    pub region: Option<String>,
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("target", &self.target)
            .field("secure", &self.secure)
            .field("region", &self.region)
            .finish()
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!(config_path = %path.display(), "Loading configuration file");
        let content = std::fs::read_to_string(path).map_err(|e| {
            TransferError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| TransferError::config(format!("TOML parsing error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_file() {
        let config = TomlConfig::from_toml_str(
            r#"
            [repository]
            url = "https://github.com/artefactual/archivematica-sampledata.git"
            branch = "main"
            dir_path = "SampleTransfers/Images"

            [storage]
            endpoint = "minio:9000"
            access_key = "ak"
            secret_key = "sk"
            target = "transfers/images.zip"
            secure = true
            region = "eu-west-1"
            "#,
        )
        .unwrap();

        assert_eq!(config.repository.branch.as_deref(), Some("main"));
        assert_eq!(
            config.repository.dir_path.as_deref(),
            Some("SampleTransfers/Images")
        );
        assert_eq!(config.storage.target.as_deref(), Some("transfers/images.zip"));
        assert_eq!(config.storage.secure, Some(true));
    }

    #[test]
    fn test_sections_are_optional() {
        let config = TomlConfig::from_toml_str("[storage]\nendpoint = \"minio:9000\"\n").unwrap();
        assert!(config.repository.url.is_none());
        assert_eq!(config.storage.endpoint.as_deref(), Some("minio:9000"));

        let empty = TomlConfig::from_toml_str("").unwrap();
        assert!(empty.storage.target.is_none());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = TomlConfig::from_toml_str("[storage]\nbucket = \"sips\"\n").unwrap_err();
        assert!(matches!(err, TransferError::ConfigError { .. }));
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = TomlConfig::from_toml_str("[storage]\nsecret_key = \"hunter2\"\n").unwrap();
        assert!(!format!("{:?}", config).contains("hunter2"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TomlConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, TransferError::ConfigError { .. }));
    }
}
