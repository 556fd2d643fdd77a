pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::s3::{S3Storage, StorageSettings};
pub use config::{toml_config::TomlConfig, TransferConfig};
pub use crate::core::{engine::TransferEngine, pipeline::TransferPipeline};
pub use domain::model::{ArchiveSummary, TransferReport, UploadReceipt, UploadTarget};
pub use utils::error::{ErrorCategory, Result, TransferError};
