mod backend;
mod commands;
mod render;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "returnly")]
#[command(about = "Turn purchase return windows into calendar reminders")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current transaction set and estimated return dates
    Transactions,
    /// Create calendar reminders for every transaction without one
    Remind {
        /// Write reminders into this calendar (by id) instead of prompting
        #[arg(short, long)]
        calendar: Option<String>,
    },
    /// Show reminder records already persisted for the signed-in user
    Records,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("returnly_core=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Transactions => commands::transactions::run().await,
        Commands::Remind { calendar } => commands::remind::run(calendar).await,
        Commands::Records => commands::records::run().await,
    }
}
