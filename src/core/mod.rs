pub mod engine;
pub mod pipeline;
pub mod workdir;

pub use crate::domain::model::{ArchiveSummary, Stage, TransferReport, UploadReceipt};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
