use crate::utils::error::{Result, TransferError};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Bucket and object key an archive is uploaded to, written as `bucket/key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub bucket: String,
    pub key: String,
}

impl UploadTarget {
    /// Splits on the first `/`; everything after it is the object key.
    pub fn parse(target: &str) -> Result<Self> {
        let (bucket, key) = target.split_once('/').ok_or_else(|| {
            TransferError::config(format!(
                "upload target '{}' must be of the form bucket/object-key",
                target
            ))
        })?;

        if bucket.is_empty() || key.is_empty() {
            return Err(TransferError::config(format!(
                "upload target '{}' has an empty bucket or object key",
                target
            )));
        }

        Ok(Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }
}

impl FromStr for UploadTarget {
    type Err = TransferError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for UploadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    pub entries: usize,
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub bucket: String,
    pub key: String,
    pub bytes: u64,
    pub e_tag: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TransferReport {
    pub archive: ArchiveSummary,
    pub receipt: UploadReceipt,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    Fetching,
    Archiving,
    Uploading,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::Fetching => "fetching",
            Stage::Archiving => "archiving",
            Stage::Uploading => "uploading",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}
