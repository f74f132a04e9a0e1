use std::sync::Arc;

use orgnest_api::app::{app, AppState};
use orgnest_api::config;
use orgnest_api::storage::{ContentStore, LocalStorage};
use orgnest_api::store::{MemoryStore, PgStore, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("starting orgnest-api in {:?} mode", config.environment);

    let store: Arc<dyn Store> = match std::env::var("DATABASE_URL") {
        Ok(url) => Arc::new(PgStore::connect(&url).await?),
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using the in-memory store");
            Arc::new(MemoryStore::new())
        }
    };
    let files: Arc<dyn ContentStore> = Arc::new(LocalStorage::new(config.storage.root.clone()));

    let router = app(AppState { store, files });

    // Allow tests or deployments to override port via env
    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on http://{}", bind_addr);

    axum::serve(listener, router).await?;
    Ok(())
}
