//! Holocron - Entry Point

use clap::Parser;
use holocron::api::SwapiClient;
use holocron::config::{self, CliOverrides};
use holocron::model::AppError;
use holocron::view::{self, ColorConfig, ViewOptions};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Holocron - browse the Star Wars API character catalog
#[derive(Parser, Debug)]
#[command(name = "holocron")]
#[command(version)]
#[command(about = "TUI application for browsing the Star Wars API character catalog")]
pub struct Args {
    /// Start with this name search instead of the full listing
    #[arg(short, long)]
    pub search: Option<String>,

    /// Base address of the API (e.g. https://www.swapi.tech/api/)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Characters requested per page
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub page_size: Option<u32>,

    /// Milliseconds of typing inactivity before a search is sent
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            base_url: self.base_url.clone(),
            page_size: self.page_size,
            debounce_ms: self.debounce_ms,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    run(args)?;
    Ok(())
}

fn run(args: Args) -> Result<(), AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = config::resolve(args.config.clone(), args.overrides())?;

    holocron::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let client = SwapiClient::new(&config)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("holocron-fetch")
        .enable_all()
        .build()
        .map_err(AppError::Runtime)?;

    let options = ViewOptions {
        page_size: config.page_size,
        debounce: config.debounce,
        initial_query: args.search,
        colors: ColorConfig::from_env_and_args(args.no_color),
    };

    view::run(Arc::new(client), runtime.handle().clone(), options)?;

    // Outstanding requests were aborted when the UI exited
    runtime.shutdown_background();
    Ok(())
}
