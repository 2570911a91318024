mod search;
mod seed;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storeloc-cli")]
#[command(about = "Store locator command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for stores near a location and print the results as JSON
    Search(search::SearchArgs),
    /// Resolve an address or postal code to coordinates
    Geocode {
        /// Free-text address or postal code
        text: String,
        /// Treat `text` as a postal code
        #[arg(long)]
        postal: bool,
    },
    /// Load the YAML store catalog into Postgres
    Seed {
        /// Validate the catalog and report what would be written
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("storeloc-cli ready; see --help for commands");
        return Ok(());
    };

    let config = storeloc_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Search(args) => search::run_search(&config, &args).await,
        Commands::Geocode { text, postal } => search::run_geocode(&config, &text, postal).await,
        Commands::Seed { dry_run } => seed::run_seed(&config, dry_run).await,
    }
}
