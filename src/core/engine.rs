use crate::core::workdir::WorkingDir;
use crate::core::{ArchiveSummary, Pipeline, Stage, TransferReport, UploadReceipt};
use crate::utils::error::{Result, TransferError};
use crate::utils::monitor::SystemMonitor;
use std::path::Path;
use std::time::Instant;

/// Runs a [`Pipeline`] inside a fresh working directory and removes that
/// directory once the run ends, whatever the outcome.
pub struct TransferEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> TransferEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<TransferReport> {
        self.run_in(&std::env::temp_dir()).await
    }

    /// Like [`run`](Self::run) but creates the working directory under
    /// `parent`.
    pub async fn run_in(&self, parent: &Path) -> Result<TransferReport> {
        let started = Instant::now();
        self.enter(Stage::Init);
        let workdir = WorkingDir::create_in(parent)?;

        let outcome = self.run_stages(workdir.path()).await;
        let cleanup = workdir.cleanup();

        match outcome {
            Ok((archive, receipt)) => {
                cleanup?;
                let report = TransferReport {
                    archive,
                    receipt,
                    elapsed: started.elapsed(),
                };
                tracing::info!(
                    stage = %Stage::Done,
                    entries = report.archive.entries,
                    bytes = report.receipt.bytes,
                    target = %format_args!("{}/{}", report.receipt.bucket, report.receipt.key),
                    elapsed = ?report.elapsed,
                    "Transfer complete"
                );
                Ok(report)
            }
            Err((stage, e)) => {
                if let Err(cleanup_err) = cleanup {
                    tracing::warn!(error = %cleanup_err, "Working directory cleanup failed");
                }
                tracing::error!(
                    stage = %Stage::Failed,
                    failed_during = %stage,
                    category = ?e.category(),
                    error = %e,
                    "Transfer failed"
                );
                Err(e)
            }
        }
    }

    async fn run_stages(
        &self,
        workdir: &Path,
    ) -> std::result::Result<(ArchiveSummary, UploadReceipt), (Stage, TransferError)> {
        self.enter(Stage::Fetching);
        let source = self
            .pipeline
            .fetch(workdir)
            .await
            .map_err(|e| (Stage::Fetching, e))?;
        self.monitor.log_stats("fetch");

        self.enter(Stage::Archiving);
        let archive = self
            .pipeline
            .archive(&source, workdir)
            .await
            .map_err(|e| (Stage::Archiving, e))?;
        self.monitor.log_stats("archive");

        self.enter(Stage::Uploading);
        let receipt = self
            .pipeline
            .upload(&archive)
            .await
            .map_err(|e| (Stage::Uploading, e))?;
        self.monitor.log_stats("upload");

        Ok((archive, receipt))
    }

    fn enter(&self, stage: Stage) {
        tracing::info!(stage = %stage, "Entering stage");
    }
}
