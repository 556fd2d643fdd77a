use crate::domain::model::{UploadReceipt, UploadTarget};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, TransferError};
use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region, RequestChecksumCalculation};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use std::fmt;
use std::path::Path;

/// Connection settings for an S3-compatible endpoint such as MinIO.
#[derive(Clone)]
pub struct StorageSettings {
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub secure: bool,
    pub region: String,
}

impl StorageSettings {
    /// Full endpoint URL. A bare `host:port` gets a scheme from `secure`.
    pub fn endpoint_url(&self) -> String {
        if self.endpoint.contains("://") {
            self.endpoint.clone()
        } else {
            let scheme = if self.secure { "https" } else { "http" };
            format!("{}://{}", scheme, self.endpoint)
        }
    }
}

impl fmt::Debug for StorageSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageSettings")
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("secure", &self.secure)
            .field("region", &self.region)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
}

impl S3Storage {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    /// Builds a path-style client with static credentials and SDK retries
    /// turned off. Checksums are only sent when an operation requires them,
    /// so the object body goes out as plain bytes.
    pub async fn connect(settings: &StorageSettings) -> Self {
        let credentials = Credentials::new(
            settings.access_key.clone(),
            settings.secret_key.clone(),
            None,
            None,
            "push-transfer",
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .endpoint_url(settings.endpoint_url())
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled())
            .load()
            .await;

        let config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .request_checksum_calculation(RequestChecksumCalculation::WhenRequired)
            .build();

        tracing::debug!(endpoint = %settings.endpoint_url(), region = %settings.region, "S3 client configured");
        Self::new(S3Client::from_conf(config))
    }
}

impl Storage for S3Storage {
    async fn put_file(&self, target: &UploadTarget, path: &Path) -> Result<UploadReceipt> {
        let upload_error = |message: String| TransferError::Upload {
            bucket: target.bucket.clone(),
            key: target.key.clone(),
            message,
        };

        let bytes = tokio::fs::metadata(path).await?.len();
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| upload_error(format!("cannot read {}: {}", path.display(), e)))?;

        tracing::info!(
            bucket = %target.bucket,
            key = %target.key,
            bytes,
            "Uploading archive"
        );

        let output = self
            .client
            .put_object()
            .bucket(&target.bucket)
            .key(&target.key)
            .content_type("application/zip")
            .body(body)
            .send()
            .await
            .map_err(|e| upload_error(DisplayErrorContext(&e).to_string()))?;

        tracing::info!(bucket = %target.bucket, key = %target.key, "Upload complete");

        Ok(UploadReceipt {
            bucket: target.bucket.clone(),
            key: target.key.clone(),
            bytes,
            e_tag: output.e_tag().map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(endpoint: &str, secure: bool) -> StorageSettings {
        StorageSettings {
            endpoint: endpoint.to_string(),
            access_key: "minio".to_string(),
            secret_key: "minio123".to_string(),
            secure,
            region: "us-east-1".to_string(),
        }
    }

    #[test]
    fn test_endpoint_url_adds_scheme() {
        assert_eq!(
            settings("localhost:7460", false).endpoint_url(),
            "http://localhost:7460"
        );
        assert_eq!(
            settings("minio.internal:9000", true).endpoint_url(),
            "https://minio.internal:9000"
        );
        assert_eq!(
            settings("https://s3.example.com", false).endpoint_url(),
            "https://s3.example.com"
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", settings("localhost:7460", false));
        assert!(rendered.contains("minio"));
        assert!(!rendered.contains("minio123"));
    }
}
