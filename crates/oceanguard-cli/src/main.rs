mod db;
mod government;
mod social;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::db::DbCommands;

#[derive(Debug, Parser)]
#[command(name = "oceanguard-cli")]
#[command(about = "Run the OceanGuard pipelines once and print JSON")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Local report store maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Aggregate social media analytics from Reddit and local reports
    Social {
        /// Restrict the corpus to hazard-related posts
        #[arg(long)]
        hazards_only: bool,
        /// Skip the local report store and count zero local reports (no DATABASE_URL needed)
        #[arg(long)]
        offline: bool,
    },
    /// Merged NOAA + USGS alert feed
    Alerts,
    /// Marine weather at a point
    Weather {
        #[arg(long, allow_negative_numbers = true, value_parser = government::parse_latitude)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true, value_parser = government::parse_longitude)]
        lng: f64,
        /// Print the 24 hour forecast instead of current conditions
        #[arg(long)]
        forecast: bool,
    },
}

/// Print `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("oceanguard-cli: no command given; see --help");
        return Ok(());
    };

    let config = oceanguard_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Db { command } => db::run_db(&config, command).await,
        Commands::Social {
            hazards_only,
            offline,
        } => social::run_social(&config, hazards_only, offline).await,
        Commands::Alerts => government::run_alerts(&config).await,
        Commands::Weather { lat, lng, forecast } => {
            government::run_weather(&config, lat, lng, forecast).await
        }
    }
}
