use axum::{
    routing::{get, post},
    Router,
};
use mongodb::Client;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod views;

use crate::config::Config;

/// Shared application state — cheap to clone (the driver client is an Arc
/// handle over its own connection pool).
#[derive(Clone)]
pub struct AppState {
    pub client: Client,
    pub config: Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ecs_inventory=debug".parse().unwrap()),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  ECS Inventory  — Rust + Axum        ║");
    info!("║  MongoDB-backed item catalogue       ║");
    info!("╚══════════════════════════════════════╝");

    let client = db::build_client(&config)?;

    // Liveness is re-derived per request, so a down store at boot is only a
    // warning; the service starts anyway and reports it on /health.
    match db::acquire(&client, &config).await {
        Some(_) => info!(
            "MongoDB reachable at {}:{} (db: {})",
            config.mongo_host, config.mongo_port, config.mongo_db
        ),
        None => warn!(
            "MongoDB unreachable at {}:{} — serving in degraded mode",
            config.mongo_host, config.mongo_port
        ),
    }

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState { client, config };
    let app = build_router(state);

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/health", get(handlers::health))

        // ── UI ──────────────────────────────────────────────────────────────
        .route("/", get(handlers::items::index))
        .route("/add", post(handlers::items::add_item))
        .route("/delete/:id", post(handlers::items::delete_item))

        // ── API ─────────────────────────────────────────────────────────────
        .route("/api/items", get(handlers::items::list_items))

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
