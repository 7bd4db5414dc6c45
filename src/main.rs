//! packstage - buildpack acquisition cache
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use packstage::cli::{Cli, Commands, LogFormat};
use packstage::config::ConfigManager;
use packstage::error::StageResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> StageResult<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::locate(cli.config.clone());
    let mut config = config_manager.load().await?;

    // 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("packstage=warn"),
        1 => EnvFilter::new("packstage=info"),
        _ => EnvFilter::new("packstage=debug"),
    };

    let log_format = cli
        .log_format
        .unwrap_or_else(|| LogFormat::from_config(&config.general.log_format));
    match log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .init(),
    }

    debug!("Using config {}", config_manager.path().display());

    if let Some(dir) = cli.cache_dir {
        debug!("Cache directory overridden: {}", dir.display());
        config.cache.dir = dir;
    }

    match cli.command {
        Commands::Fetch(args) => packstage::cli::commands::fetch(args, &config).await,
        Commands::Translate(args) => packstage::cli::commands::translate(args, &config).await,
        Commands::Archive(args) => packstage::cli::commands::archive(args).await,
        Commands::Cache(args) => packstage::cli::commands::cache(args, &config).await,
        Commands::Config(args) => {
            packstage::cli::commands::config(args, &config, &config_manager).await
        }
    }
}
