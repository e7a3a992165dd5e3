//! Bazaar storefront CLI

mod cli;

use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bazaar_app::{config::AppConfig, context::AppContext};

#[derive(Debug, Parser)]
#[command(name = "bazaar-app", about = "Bazaar storefront CLI", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Seed the document store's product collection from the catalog.
    Seed(SeedArgs),

    /// List the catalog products.
    Products,
}

#[derive(Debug, Args)]
struct SeedArgs {
    /// Stock quantity assigned to every seeded product.
    #[arg(long, default_value_t = 10)]
    stock: u32,
}

#[tokio::main]
async fn main() {
    let _env = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let context = AppContext::from_config(&cli.config);

    match cli.command {
        Commands::Seed(args) => cli::seed::run(&context, args.stock).await,
        Commands::Products => cli::products::run(&context).await,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
