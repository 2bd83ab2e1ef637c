use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use projman::api::{self, AppState};
use projman::config::ServerConfig;
use projman::db::Database;

#[derive(Parser)]
#[command(name = "projman")]
#[command(about = "Record management for projects and their notes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port for the HTTP API (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Create the schema and exit
    Init,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "projman=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = ServerConfig::from_env();

    match cli.command {
        Some(Commands::Init) => {
            let db = Database::open(&config.db_path)?;
            db.migrate()?;
            tracing::info!("schema initialized at {}", config.db_path.display());
            return Ok(());
        }
        Some(Commands::Serve { port }) => {
            if let Some(port) = port {
                config.port = port;
            }
        }
        None => {}
    }

    if config.api_key == ServerConfig::DEFAULT_API_KEY {
        tracing::warn!("API_KEY is not set; using the development default");
    }

    let db = Database::open(&config.db_path)?;
    db.migrate()?;
    tracing::info!("store opened at {}", config.db_path.display());

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!("listening on http://{}:{}", config.host, config.port);

    let state = AppState {
        db,
        config: Arc::new(config),
    };
    axum::serve(listener, api::router(state)).await?;

    Ok(())
}
