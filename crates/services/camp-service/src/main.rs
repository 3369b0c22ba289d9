//! Camp Service - HTTP API for summer camp records.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use camp_service_lib::config::{CampServiceConfig, DEFAULT_HOST, DEFAULT_PORT};
use camp_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "camp-service")]
#[command(author, version, about = "Summer camp records API", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(short = 'H', long, env = "CAMP_SERVICE_HOST", default_value = DEFAULT_HOST)]
        host: String,
        #[arg(short, long, env = "CAMP_SERVICE_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Insert demo campers, activities and signups into an empty database
    Seed,
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tower_http=debug".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CampServiceConfig::from_env();
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Serve { host, port } => {
            let config = CampServiceConfig {
                host,
                port,
                ..config
            };
            camp_service_lib::run_server(config).await?;
        }
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            camp_service_lib::run_migrations(config, migrate_action).await?;
        }
        Commands::Seed => {
            camp_service_lib::run_seed(config).await?;
        }
    }

    Ok(())
}
