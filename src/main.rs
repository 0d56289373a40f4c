//! deque-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use deque_gateway::api;
use deque_gateway::app_state::AppState;
use deque_gateway::config::{GatewayConfig, LogFormat};
use deque_gateway::domain::EventBus;
use deque_gateway::service::MessageService;
use deque_gateway::store::{MemoryStore, PostgresStore, StoreBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = GatewayConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    tracing::info!(addr = %config.listen_addr, "starting deque-gateway");

    // Build storage layer
    let store = if config.persistence_enabled {
        let pg = PostgresStore::connect(&config)
            .await
            .context("connecting to PostgreSQL")?;
        pg.migrate().await.context("running migrations")?;
        StoreBackend::Postgres(pg)
    } else {
        StoreBackend::Memory(MemoryStore::new())
    };
    tracing::info!(
        backend = store.name(),
        durable = store.is_durable(),
        "store ready"
    );

    // Build service layer
    let event_bus = EventBus::new(config.event_bus_capacity);
    let service = MessageService::new(
        store,
        event_bus,
        config.message_key_prefix.clone(),
        config.max_message_bytes,
    );

    // Build router
    let app = api::build_app(AppState::new(service));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await.context("serving HTTP")?;

    Ok(())
}
