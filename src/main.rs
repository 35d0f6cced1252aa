//! Diiwaan - registry gateway for the national biographical archive

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use diiwaan::{
    archive::ArchiveService,
    config::Args,
    server,
    store::{MemoryGateway, RepositoryGateway, RestGateway, RestGatewayConfig},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing/logging
    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("diiwaan={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Validate configuration
    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    // Print startup banner
    info!("======================================");
    info!("  Diiwaan - National Archive Gateway");
    info!("======================================");
    info!("Listen: {}", args.listen);
    info!("Mode: {}", if args.dev_mode { "DEVELOPMENT" } else { "PRODUCTION" });
    info!("Default locale: {}", args.locale());
    match args.store_url.as_deref() {
        Some(url) => info!("Store: {}", url),
        None => info!("Store: in-memory (dev mode)"),
    }
    info!("======================================");

    // Select the repository gateway
    let gateway: Arc<dyn RepositoryGateway> = if args.dev_mode && args.store_url.is_none() {
        info!("Using in-memory store");
        Arc::new(MemoryGateway::new())
    } else {
        let config = RestGatewayConfig {
            base_url: args.store_url.clone().unwrap_or_default(),
            api_key: args.store_api_key.clone().unwrap_or_default(),
            timeout_ms: args.request_timeout_ms,
        };
        Arc::new(RestGateway::new(config)?)
    };

    // Build the initial snapshot. Fetch failures degrade to an empty
    // archive; the service stays up and rebuilds on the next mutation.
    let archive = Arc::new(ArchiveService::new(gateway, args.locale()));
    let snapshot = archive.rebuild(args.locale()).await;
    info!(
        "Initial snapshot: {} profiles, {} placements (epoch {})",
        snapshot.profiles.len(),
        snapshot.grouping.placement_count(),
        snapshot.epoch
    );

    // Serve
    let state = Arc::new(server::AppState::new(args, archive));
    server::run(state).await?;

    Ok(())
}
