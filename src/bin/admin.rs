//! Market data administration: schema setup, bulk loads and purges.

use carvalue::config::Settings;
use carvalue::services::{load_market_data_file, PostgresClient};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "carvalue-admin", version, about = "Carvalue market data administration")]
struct Cli {
    #[arg(long, global = true, help = "Configuration file (defaults to config/default.toml)")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the database schema
    InitDb,
    /// Load a '|'-delimited market data file
    Load {
        #[arg(value_parser = existing_file)]
        file: PathBuf,
    },
    /// Delete all market data
    Purge,
}

fn existing_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("no such file: {}", value))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    match run(cli.command, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let client = PostgresClient::from_settings(
        &settings.database.url,
        Some(1),
        Some(1),
        settings.database.acquire_timeout_secs,
        settings.database.idle_timeout_secs,
    )
    .await?;

    match command {
        Commands::InitDb => {
            client.migrate().await?;
            println!("Initialized the database");
        }
        Commands::Load { file } => {
            println!("Processing market data file: {}", file.display());
            let report = load_market_data_file(&file, &client).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            println!("Market data file has been processed");
        }
        Commands::Purge => {
            println!("Purging existing market data");
            let purged = client.purge().await?;
            println!("Market data has been purged ({} listings)", purged);
        }
    }

    Ok(())
}
