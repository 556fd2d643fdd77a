// Adapters layer: concrete implementations for external systems (git, zip, S3).

pub mod archive;
pub mod git;
pub mod s3;
