//! Accessibility Scanner API Server

use a11y_api::{build_router, db::PgStore, AppConfig, AppState};
use a11y_core::{MemoryStore, ResultStore};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "a11y_api=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Accessibility Scanner API Server");

    let config = AppConfig::from_env()?;

    let store: Arc<dyn ResultStore> = match &config.database_url {
        Some(url) => {
            let store = PgStore::connect(url, config.max_connections).await?;
            info!("Connected to database");

            store.migrate().await?;
            info!("Database migrations complete");
            Arc::new(store)
        }
        None => {
            warn!("DATABASE_URL not set; results are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::from_config(config, store)?);
    info!("Validators: {}", state.scanner.validators().names().join(", "));

    let app = build_router(state);

    info!("Listening on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
