use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("git {step} failed ({status}): {stderr}")]
    Git {
        step: String,
        status: String,
        stderr: String,
    },

    #[error("directory '{path}' not found on branch '{branch}'")]
    PathNotFound { path: String, branch: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Directory traversal failed: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Archive is empty: no files found under {path}")]
    EmptyArchive { path: String },

    #[error("Upload to {bucket}/{key} failed: {message}")]
    Upload {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

/// Failure classes of a transfer run. Every class is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Vcs,
    Filesystem,
    Configuration,
    Transport,
}

impl TransferError {
    pub fn config(message: impl Into<String>) -> Self {
        TransferError::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            TransferError::Git { .. } | TransferError::PathNotFound { .. } => ErrorCategory::Vcs,
            TransferError::ZipError(_)
            | TransferError::WalkError(_)
            | TransferError::IoError(_)
            | TransferError::EmptyArchive { .. } => ErrorCategory::Filesystem,
            TransferError::ConfigError { .. }
            | TransferError::InvalidConfigValueError { .. }
            | TransferError::MissingConfigError { .. } => ErrorCategory::Configuration,
            TransferError::Upload { .. } => ErrorCategory::Transport,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TransferError::Git { .. } => {
                "Check that the repository URL is reachable and the branch exists"
            }
            TransferError::PathNotFound { .. } => {
                "Check --dir-path against the repository layout on that branch"
            }
            TransferError::EmptyArchive { .. } => "The directory contains no regular files",
            TransferError::ZipError(_)
            | TransferError::WalkError(_)
            | TransferError::IoError(_) => "Check free space and permissions of the temp directory",
            TransferError::Upload { .. } => {
                "Check the endpoint, credentials and that the bucket exists"
            }
            TransferError::ConfigError { .. }
            | TransferError::InvalidConfigValueError { .. }
            | TransferError::MissingConfigError { .. } => "Fix the flag or config file value",
        }
    }
}

pub type Result<T> = std::result::Result<T, TransferError>;
