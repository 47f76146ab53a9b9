//! Billogram gateway server.

use std::sync::Arc;

use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use billogram_gateway::adapters::billogram::{BillogramAdapter, BillogramApiConfig};
use billogram_gateway::adapters::http::{gateway_router, GatewayAppState};
use billogram_gateway::adapters::memory::InMemoryOrderStore;
use billogram_gateway::config::{AppConfig, ServerConfig};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let mut api_config = BillogramApiConfig::new(
        config.billogram.api_user.clone(),
        config.billogram.api_password.clone(),
    )
    .sandbox(config.billogram.sandbox)
    .with_timeout(config.billogram.timeout());
    if let Some(base_url) = &config.billogram.base_url {
        api_config = api_config.with_base_url(base_url.clone());
    }
    let billing = BillogramAdapter::new(api_config)?;

    let orders = match &config.server.orders_seed_path {
        Some(path) => {
            let store = InMemoryOrderStore::load_json(path).await?;
            tracing::info!(path = %path, "Loaded seed orders");
            store
        }
        None => InMemoryOrderStore::new(),
    };

    let state = GatewayAppState::new(Arc::new(billing), Arc::new(orders), &config.gateway);
    if !state.descriptor.is_available() {
        tracing::warn!("Invoice payment is disabled; checkout will not offer it");
    }

    let app = gateway_router()
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        sandbox = config.billogram.sandbox,
        "Billogram gateway listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if server.log_json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}
