mod adapters;
mod api;
mod config;
mod db;
mod error;
mod ingest;
mod models;
mod parser;
mod physics;
mod repo;
mod risk;
mod ui;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::{
    adapters::{FeedAdapter, NeoWsAdapter},
    api::{
        create_impact_scenario, fetch_asteroids, get_asteroid, list_asteroids,
        list_impact_scenarios, root, stats,
    },
    config::AppConfig,
    repo::{ObjectRepository, ScenarioRepository},
};

#[derive(Clone)]
pub struct AppState {
    pub objects: ObjectRepository,
    pub scenarios: ScenarioRepository,
    pub feed: Arc<dyn FeedAdapter>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = AppConfig::load()?;

    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;

    let feed = NeoWsAdapter::from_config(&config).context("failed to set up feed client")?;
    let state = AppState {
        objects: ObjectRepository::new(pool.clone()),
        scenarios: ScenarioRepository::new(pool.clone()),
        feed: Arc::new(feed),
    };

    let app = app(state)
        .layer(cors_layer(&config))
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("invalid host/port")?;

    info!(%addr, "neo-risk listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("database closed");
    Ok(())
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api", get(root))
        .route("/api/", get(root))
        .route("/api/asteroids", get(list_asteroids))
        .route("/api/asteroids/fetch", get(fetch_asteroids))
        .route("/api/asteroids/{reference_id}", get(get_asteroid))
        .route("/api/impact-scenario", post(create_impact_scenario))
        .route("/api/impact-scenarios", get(list_impact_scenarios))
        .route("/api/stats", get(stats))
        .route("/", get(ui::index))
        .with_state(state)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(%origin, "ignoring invalid cors origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .init();
}
