use crate::adapters::s3::StorageSettings;
use crate::config::toml_config::TomlConfig;
use crate::config::{self, TransferConfig};
use crate::domain::model::UploadTarget;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "push-transfer", version)]
#[command(about = "Sparse-clone a repository directory with git, zip it, and upload it to MinIO")]
pub struct CliConfig {
    /// Git repo URL [default: archivematica-sampledata on GitHub]
    #[arg(long)]
    pub repo_url: Option<String>,

    /// Branch to fetch [default: master]
    #[arg(long)]
    pub branch: Option<String>,

    /// Path within repo to sparse-checkout [default: SampleTransfers/Images/pictures]
    #[arg(long)]
    pub dir_path: Option<String>,

    /// MinIO server endpoint, host:port or URL [default: localhost:7460]
    #[arg(long)]
    pub minio_endpoint: Option<String>,

    /// MinIO access key [default: minio]
    #[arg(long, env = "PUSH_TRANSFER_ACCESS_KEY", hide_env_values = true)]
    pub access_key: Option<String>,

    /// MinIO secret key [default: minio123]
    #[arg(long, env = "PUSH_TRANSFER_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// MinIO target bucket/object [default: sips/transfer.zip]
    #[arg(long)]
    pub minio_target: Option<String>,

    /// Use TLS when talking to the endpoint
    #[arg(long)]
    pub secure: bool,

    /// Region sent to the endpoint [default: us-east-1]
    #[arg(long)]
    pub region: Option<String>,

    /// TOML file supplying values for flags that are not given
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Validate the configuration and print the plan without running it
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Log CPU and memory usage after each stage
    #[arg(long)]
    pub monitor: bool,
}

fn pick(flag: &Option<String>, file: Option<String>, default: &str) -> String {
    flag.clone()
        .or(file)
        .unwrap_or_else(|| default.to_string())
}

impl CliConfig {
    /// Merges flags, the optional config file, and built-in defaults.
    pub fn resolve(&self) -> Result<TransferConfig> {
        let file = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        self.resolve_with(file)
    }

    pub fn resolve_with(&self, file: TomlConfig) -> Result<TransferConfig> {
        let TomlConfig {
            repository,
            storage,
        } = file;

        let target = UploadTarget::parse(&pick(
            &self.minio_target,
            storage.target,
            config::DEFAULT_TARGET,
        ))?;

        let dir_path = pick(&self.dir_path, repository.dir_path, config::DEFAULT_DIR_PATH);

        Ok(TransferConfig {
            repo_url: pick(&self.repo_url, repository.url, config::DEFAULT_REPO_URL),
            branch: pick(&self.branch, repository.branch, config::DEFAULT_BRANCH),
            dir_path: dir_path.trim_end_matches('/').to_string(),
            target,
            storage: StorageSettings {
                endpoint: pick(&self.minio_endpoint, storage.endpoint, config::DEFAULT_ENDPOINT),
                access_key: pick(&self.access_key, storage.access_key, config::DEFAULT_ACCESS_KEY),
                secret_key: pick(&self.secret_key, storage.secret_key, config::DEFAULT_SECRET_KEY),
                secure: self.secure || storage.secure.unwrap_or(false),
                region: pick(&self.region, storage.region, config::DEFAULT_REGION),
            },
        })
    }
}
