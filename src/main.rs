use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

mod commands;
mod extractor;
mod fetch;
mod output;
mod provider;
mod telemetry;

use extractor::DirectExtractor;
use fetch::{FetchConfig, HttpFetcher};
use provider::{Provider, SiteConfig};

#[derive(Parser)]
#[command(name = "ekino", about = "Ekino content provider CLI")]
struct Cli {
    /// Site base URL (overrides EKINO_BASE_URL)
    #[arg(global = true, long)]
    base_url: Option<String>,
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provider metadata
    Info,
    /// Landing page categories
    Catalog,
    Search(commands::SearchCmd),
    /// Title details and episodes
    Load(commands::LoadCmd),
    /// Resolve stream links for a title
    Links(commands::LinksCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // initialize logging/tracing (stderr). Respect RUST_LOG and EKINO_LOG_FORMAT
    telemetry::config::init_tracing();

    let site = match cli.base_url.as_deref() {
        Some(base) => SiteConfig::new(base)?,
        None => SiteConfig::from_env()?,
    };
    let fetcher = HttpFetcher::new(FetchConfig::from_env())?;
    let extractor = DirectExtractor::new(site.base_url.as_str());
    let provider = Provider::new(site, Arc::new(fetcher), Arc::new(extractor));

    match cli.command {
        Commands::Info => commands::info(&provider)?,
        Commands::Catalog => commands::catalog(&provider).await?,
        Commands::Search(args) => commands::search(&provider, args).await?,
        Commands::Load(args) => commands::load(&provider, args).await?,
        Commands::Links(args) => commands::links(&provider, args).await?,
    }

    Ok(())
}
