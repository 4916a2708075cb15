mod api;
mod catalog;
mod cli;
mod commands;
mod config;
mod derive;
mod http;
mod models;
mod session;
mod store;

use anyhow::Result;
use api::BackendClient;
use catalog::CatalogClient;
use clap::Parser;
use cli::Cli;
use commands::AppContext;
use config::Configuration;
use http::HttpClient;
use session::SessionStore;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(&cli.log_level)
        .init();

    info!("Starting Reelist v0.1.0");

    // Load configuration
    let config = Configuration::from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    // Initialize HTTP client and the persisted session
    let http_client = HttpClient::new();
    let session = SessionStore::open(&config.session_file).into_shared();

    let ctx = AppContext {
        backend: BackendClient::new(http_client.clone(), config.api.clone()),
        catalog: CatalogClient::new(http_client, config.catalog.clone()),
        session,
    };

    if let Err(message) = commands::dispatch(&ctx, cli.command).await {
        eprintln!("error: {}", message);
        std::process::exit(1);
    }

    Ok(())
}
