mod error;
mod handlers;
mod judge;
mod languages;
mod metrics;
mod normalize;
mod persist;
mod routes;
mod sandbox;
mod verdict;


use anyhow::Context;
use axum::Router;
use gavel_common::config::Config;
use languages::LanguageRegistry;
use redis::aio::ConnectionManager;
use sandbox::PistonClient;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

pub struct AppState {
    pub redis: ConnectionManager,
    pub languages: LanguageRegistry,
    pub sandbox: PistonClient,
    pub config: Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Gavel API booting...");

    let config = Config::from_env();

    // Load language -> runtime-version registry
    let languages = LanguageRegistry::load_from_file(&config.languages_path).map_err(|e| {
        error!("Failed to load language configuration: {}", e);
        error!("Make sure {} exists", config.languages_path);
        e
    })?;
    info!(
        "Loaded runtime versions for: {:?}",
        languages
            .enabled_languages()
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
    );

    // Connect to Redis
    let client =
        redis::Client::open(config.redis_url.as_str()).context("Failed to create Redis client")?;
    let redis_conn = ConnectionManager::new(client)
        .await
        .context("Failed to connect to Redis")?;
    info!("Connected to Redis: {}", config.redis_url);

    let piston = PistonClient::new(&config)?;
    info!("Sandbox endpoint: {}", config.sandbox_url);

    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState {
        redis: redis_conn,
        languages,
        sandbox: piston,
        config,
    });

    // Build router
    let app = Router::new().merge(routes::routes()).with_state(state);

    // Start server
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;

    info!("HTTP server listening on {}", bind_addr);
    info!("Ready to judge submissions");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
