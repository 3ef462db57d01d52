use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use algae_history_core::DEFAULT_HTTP_PORT;
use algae_history_service::HistoryService;
use algae_history_storage::{DatabaseConfig, PgHistoryStore};

mod commands;

#[derive(Parser)]
#[command(name = "algae-history")]
#[command(version, about = "Record and browse algae analysis history", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        #[arg(short, long, default_value_t = DEFAULT_HTTP_PORT)]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
        /// Browser origin allowed to call the API (any origin when unset)
        #[arg(long, env = "ALGAE_HISTORY_CORS_ORIGIN")]
        cors_origin: Option<String>,
    },
    /// Create the history table if it does not exist
    Migrate,
    /// Print every record, newest first
    List,
    /// Insert one record
    Record {
        #[arg(long)]
        file_name: String,
        /// Analysis time, e.g. 2024-01-15T10:30:00
        #[arg(long)]
        timestamp: String,
        /// Cell count, or N/A
        #[arg(long)]
        total_cells: Option<String>,
        /// Density in cells/mL, or N/A
        #[arg(long)]
        density: Option<String>,
    },
}

pub(crate) fn database_config() -> Result<DatabaseConfig> {
    Ok(DatabaseConfig::from_env()?)
}

pub(crate) fn history_service(config: DatabaseConfig) -> Arc<HistoryService> {
    Arc::new(HistoryService::new(Arc::new(PgHistoryStore::new(config))))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host, cors_origin } => {
            commands::serve::run(port, host, cors_origin).await?;
        },
        Commands::Migrate => commands::migrate::run().await?,
        Commands::List => commands::history::run_list().await?,
        Commands::Record { file_name, timestamp, total_cells, density } => {
            commands::history::run_record(file_name, timestamp, total_cells, density).await?;
        },
    }

    Ok(())
}
