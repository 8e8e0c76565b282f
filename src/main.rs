//! Cachebust - content-hash fingerprinting for static assets
//!
//! CLI entry point that dispatches to subcommands.

use cachebust::cli::{Cli, Commands};
use cachebust::config::ConfigManager;
use cachebust::error::{CachebustError, CachebustResult};
use clap::Parser;
use console::style;
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

async fn run() -> CachebustResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("cachebust=warn"),
        1 => EnvFilter::new("cachebust=info"),
        _ => EnvFilter::new("cachebust=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    cachebust::ui::init_theme();

    // Init command doesn't need config loading
    if let Commands::Init(args) = cli.command {
        return cachebust::cli::commands::init(args).await;
    }

    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };

    let cwd =
        std::env::current_dir().map_err(|e| CachebustError::io("getting current directory", e))?;

    // Find local config unless --no-local is set
    let local_config_path = if cli.no_local {
        debug!("Local config discovery disabled (--no-local)");
        None
    } else {
        let found = ConfigManager::find_local_config(&cwd);
        if let Some(ref path) = found {
            debug!("Found local config: {}", path.display());
        }
        found
    };

    let config = config_manager
        .load_merged(local_config_path.as_deref())
        .await?;

    // Relative paths in a local config are relative to the file itself
    let project_root = local_config_path
        .as_deref()
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .unwrap_or(cwd);
    debug!("Project root: {}", project_root.display());

    match cli.command {
        Commands::Init(_) => unreachable!("Init handled above"),
        Commands::Run(args) => cachebust::cli::commands::run(args, &config, &project_root).await,
        Commands::Map(args) => cachebust::cli::commands::map(args, &config, &project_root).await,
        Commands::Config(args) => {
            cachebust::cli::commands::config(args, &config, &config_manager).await
        }
    }
}
