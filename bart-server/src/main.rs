use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bart_server::analytics::{AnalyticsRecorder, MemorySink};
use bart_server::bart::{BartClient, BartConfig};
use bart_server::cache::{CacheConfig, CachedBartClient};
use bart_server::web::{AppState, create_router};

/// BART's public demo API key, used when no key is configured.
const PUBLIC_API_KEY: &str = "MW9S-E7SL-26DU-VV8V";

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    // Get the API key from the environment
    let api_key = std::env::var("BART_API_KEY").unwrap_or_else(|_| {
        tracing::warn!("BART_API_KEY not set; using the public demo key");
        PUBLIC_API_KEY.to_string()
    });

    // Create the BART client
    let bart_config = BartConfig::new(&api_key);
    let bart_client = BartClient::new(bart_config).expect("Failed to create BART client");

    // Create the cached client (24-hour reference data TTL)
    let cache_config = CacheConfig::default();
    let cached_bart = CachedBartClient::new(bart_client, &cache_config);

    // Create the analytics recorder
    let analytics = AnalyticsRecorder::new(MemorySink::new());

    // Build app state and router
    let state = AppState::new(cached_bart, analytics);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    tracing::info!("BART proxy listening on http://{addr}");
    tracing::info!("  POST /bart                 - closest stations with departures");
    tracing::info!("  POST /directions           - trip itineraries");
    tracing::info!("  GET  /stations             - station name table");
    tracing::info!("  GET  /admin/api/analytics  - usage summary");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to port 3000");
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
