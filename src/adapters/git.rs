//! Sparse, shallow checkout of a single directory through the system `git`
//! binary. Each step is its own `git` invocation; the first one that exits
//! non-zero aborts the checkout.

use crate::utils::error::{Result, TransferError};
use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct SparseCheckout<'a> {
    pub repo_url: &'a str,
    pub branch: &'a str,
    pub dir_path: &'a str,
}

impl SparseCheckout<'_> {
    /// Pattern written to `.git/info/sparse-checkout` (non-cone mode).
    pub fn pattern(&self) -> String {
        format!("{}/*\n", self.dir_path.trim_end_matches('/'))
    }

    fn fetch_refspec(&self) -> String {
        format!(
            "+refs/heads/{branch}:refs/remotes/origin/{branch}",
            branch = self.branch
        )
    }

    /// Materializes only `dir_path` of `branch` under `dest`.
    pub async fn run(&self, dest: &Path) -> Result<()> {
        tracing::info!(
            repo_url = self.repo_url,
            branch = self.branch,
            dir_path = self.dir_path,
            dest = %dest.display(),
            "Starting sparse checkout"
        );

        tokio::fs::create_dir_all(dest).await?;

        run_git("init", None, [OsStr::new("init"), OsStr::new("--quiet"), dest.as_os_str()]).await?;
        run_git("remote add", Some(dest), ["remote", "add", "origin", self.repo_url]).await?;

        let refspec = self.fetch_refspec();
        let settings = [
            ("core.sparseCheckout", "true"),
            ("core.sparseCheckoutCone", "false"),
            ("remote.origin.fetch", refspec.as_str()),
            ("fetch.recurseSubmodules", "false"),
            ("transfer.fsckobjects", "true"),
            ("fetch.fsckobjects", "true"),
        ];
        for (key, value) in settings {
            run_git("config", Some(dest), ["config", key, value]).await?;
        }

        let info_dir = dest.join(".git").join("info");
        tokio::fs::create_dir_all(&info_dir).await?;
        tokio::fs::write(info_dir.join("sparse-checkout"), self.pattern()).await?;

        run_git(
            "fetch",
            Some(dest),
            [
                "fetch",
                "--no-tags",
                "--depth",
                "1",
                "--filter=blob:none",
                "origin",
                self.branch,
            ],
        )
        .await?;
        run_git("checkout", Some(dest), ["checkout", "--quiet", self.branch]).await?;

        tracing::info!(dest = %dest.display(), "Sparse checkout complete");
        Ok(())
    }
}

async fn run_git<I, S>(step: &str, repo: Option<&Path>, args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new("git");
    if let Some(repo) = repo {
        cmd.arg("-C").arg(repo);
    }
    cmd.args(args);

    cmd.env("GIT_TERMINAL_PROMPT", "0");
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    tracing::debug!(command = ?cmd.as_std(), "Running git {}", step);

    let output = cmd.output().await.map_err(|e| TransferError::Git {
        step: step.to_string(),
        status: "not started".to_string(),
        stderr: e.to_string(),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        tracing::error!(step, status = %output.status, "git exited with failure");
        return Err(TransferError::Git {
            step: step.to_string(),
            status: output.status.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(())
}
