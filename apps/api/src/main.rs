mod config;
mod errors;
mod llm_client;
mod models;
mod recommend;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{GeminiClient, TextModel};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{AppwriteStore, CareerStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("pathforge_api={}", &config.rust_log))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pathforge API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the document store client
    let store: Arc<dyn CareerStore> = Arc::new(AppwriteStore::new(
        config.appwrite_endpoint.clone(),
        config.appwrite_project_id.clone(),
        config.appwrite_api_key.clone(),
        config.database_id.clone(),
        config.career_collection_id.clone(),
    ));
    info!("Document store client initialized");

    // Initialize the model client
    let llm: Arc<dyn TextModel> = Arc::new(GeminiClient::new(config.gemini_api_key.clone()));
    info!("Model client initialized (model: {})", llm_client::MODEL);

    // Build app state
    let state = AppState {
        store,
        llm,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
