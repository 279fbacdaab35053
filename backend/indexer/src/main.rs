//! Credit Ledger Indexer — entry point.
//!
//! Starts a background indexer task that polls Soroban `getEvents` RPC for
//! credit ledger contract events and persists them to SQLite.  Simultaneously
//! exposes a small Axum REST API over the indexed mint journal and the
//! administrative history.

mod api;
mod config;
mod db;
mod errors;
mod events;
mod indexer;
mod rpc;

use reqwest::Client;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use indexer::Indexer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging (RUST_LOG controls verbosity).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load optional .env file (ignored if missing).
    let _ = dotenvy::dotenv();

    // Load config from environment.
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("{e}"))?;
    info!(
        rpc_url = %config.rpc_url,
        database_url = %config.database_url,
        "Configuration loaded"
    );

    // Set up the SQLite connection pool and run migrations.
    let pool = db::init_pool(&config.database_url).await?;

    // HTTP client shared between the indexer and (future) outbound calls.
    let client = Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    // ─── Background indexer ───────────────────────────────
    // A broken resume point aborts startup rather than re-indexing from scratch.
    let indexer = Indexer::resume(pool.clone(), config.clone(), client).await?;
    tokio::spawn(indexer.run());

    // ─── REST API ─────────────────────────────────────────
    let app = api::router(pool)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.api_port);
    info!("API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
