//! Habr-Harvest main entry point
//!
//! This is the command-line interface for the Habr-Harvest article harvester.

use anyhow::Context;
use clap::Parser;
use habr_harvest::config::{load_config_with_hash, Config};
use habr_harvest::crawler::run_harvest;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Habr-Harvest: a topic-flow article harvester
///
/// Walks the listing pages of every configured topic, extracts each
/// article and exports the deduplicated result to `{output}/{text-type}.csv`.
/// Without a configuration file all six topics of the `news` flow are
/// harvested into `data/news.csv`.
#[derive(Parser, Debug)]
#[command(name = "habr-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A topic-flow article harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    tracing::info!(
        "Harvesting {} for topics {:?} from {}",
        config.crawl.text_type,
        config.crawl.topics,
        config.site.base_url
    );

    match run_harvest(config).await {
        Ok((path, stats)) => {
            tracing::info!(
                "Harvest finished: {} rows in {}",
                stats.exported_rows,
                path.display()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("habr_harvest=info,warn"),
            1 => EnvFilter::new("habr_harvest=debug,info"),
            _ => EnvFilter::new("habr_harvest=trace,debug"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
