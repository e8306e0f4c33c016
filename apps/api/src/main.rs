mod auth;
mod config;
mod db;
mod errors;
mod models;
mod routes;
mod screening;
mod state;
mod store;
#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::SupabaseIdentity;
use crate::config::Config;
use crate::db::{create_pool, init_schema};
use crate::routes::build_router;
use crate::screening::extract::PdfTextExtractor;
use crate::state::AppState;
use crate::store::{seed::seed_default_roles, PgStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL, schema and default roles
    let db = create_pool(&config.database_url).await?;
    init_schema(&db).await?;
    let store = Arc::new(PgStore::new(db));
    seed_default_roles(store.as_ref()).await?;

    // Initialize identity verifier
    let identity = SupabaseIdentity::new(&config.identity_url, config.identity_api_key.clone())?;
    info!("Identity verifier initialized ({})", config.identity_url);

    // Build app state
    let state = AppState {
        roles: store.clone(),
        resumes: store,
        identity: Arc::new(identity),
        extractor: Arc::new(PdfTextExtractor),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins to the dashboard host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
