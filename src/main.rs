use clap::Parser;
use push_transfer::utils::{logger, validation::Validate};
use push_transfer::{
    CliConfig, S3Storage, TransferConfig, TransferEngine, TransferError, TransferPipeline,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose, cli.log_format);
    tracing::info!("Starting push-transfer");

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => fail(e),
    };
    tracing::debug!(?config, "Resolved configuration");

    if cli.dry_run {
        tracing::info!("Dry run: nothing will be fetched or uploaded");
        display_plan(&config);
        return;
    }

    let storage = S3Storage::connect(&config.storage).await;
    let pipeline = TransferPipeline::new(storage, config);
    let engine = TransferEngine::new_with_monitoring(pipeline, cli.monitor);

    match engine.run().await {
        Ok(report) => {
            println!(
                "Uploaded {} files ({} bytes) to {}/{}",
                report.archive.entries,
                report.receipt.bytes,
                report.receipt.bucket,
                report.receipt.key
            );
        }
        Err(e) => fail(e),
    }
}

fn fail(e: TransferError) -> ! {
    tracing::error!(category = ?e.category(), "Suggestion: {}", e.recovery_suggestion());
    eprintln!("Error: {}", e);
    std::process::exit(1);
}

fn display_plan(config: &TransferConfig) {
    println!("Repository: {}", config.repo_url);
    println!("Branch:     {}", config.branch);
    println!("Directory:  {}", config.dir_path);
    println!("Endpoint:   {}", config.storage.endpoint_url());
    println!("Target:     {}", config.target);
}
