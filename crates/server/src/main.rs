use std::path::Path;

use clap::{Parser, Subcommand};
use tracing::info;

use docshelf_server::api::{self, AppState};
use docshelf_server::config::DocshelfConfig;
use docshelf_server::store_factory;
use docshelf_store_postgres::PostgresDocumentStore;

/// docshelf documents HTTP server.
#[derive(Parser, Debug)]
#[command(name = "docshelf-server", about = "Standalone HTTP server for the docshelf documents API")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "docshelf.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run database migrations for the configured store backend, then exit.
    Migrate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration from TOML file, or use defaults if the file does not exist.
    let config: DocshelfConfig = if Path::new(&cli.config).exists() {
        let contents = std::fs::read_to_string(&cli.config)?;
        toml::from_str(&contents)?
    } else {
        toml::from_str("")?
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if !Path::new(&cli.config).exists() {
        info!(
            path = %cli.config,
            "config file not found, using defaults"
        );
    }

    if let Some(Commands::Migrate) = cli.command {
        return run_migrate(&config).await;
    }

    // Create the store backend.
    let store = store_factory::create_store(&config.store).await?;
    info!(backend = %config.store.backend, "document store initialized");

    let state = AppState { store };
    let app = api::router(state);

    let host = cli.host.unwrap_or_else(|| config.server.host.clone());
    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}

/// Connect to the configured backend and run its migrations, then exit.
async fn run_migrate(config: &DocshelfConfig) -> Result<(), Box<dyn std::error::Error>> {
    match config.store.backend.as_str() {
        "postgres" => {
            let pg = store_factory::postgres_config(&config.store);
            info!(url = %pg.url, schema = %pg.schema, "running postgres migrations");
            // Connecting runs the migrations.
            PostgresDocumentStore::new(pg).await?;
            info!("migrations complete");
            Ok(())
        }
        "memory" => {
            info!("memory backend requires no migrations");
            Ok(())
        }
        other => Err(format!("unknown store backend: {other}").into()),
    }
}
