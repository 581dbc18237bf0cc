//! HTTP surface of the finance dashboard.
//!
//! Routes are grouped per resource (`*_routes` modules) and merged into one
//! router sharing an immutable [`SampleStore`] built at startup.

pub mod ai_routes;
pub mod config;
pub mod error;
pub mod financial_routes;
pub mod openapi;
pub mod request_id;
pub mod shareholder_routes;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Method, Request},
    middleware,
    routing::get,
    Json, Router,
};
use financial_data::SampleStore;
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use config::ServerConfig;
pub use error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SampleStore>,
}

impl AppState {
    pub fn new(store: SampleStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SampleStore::build())
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up; lists the years held in memory")),
    tag = "Health"
)]
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "years": state.store.years(),
    }))
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = tracing::field::Empty,
        )
    });

    Router::new()
        .route("/health", get(health))
        .route("/api/openapi.json", get(openapi::openapi_json))
        .merge(financial_routes::financial_routes())
        .merge(shareholder_routes::shareholder_routes())
        .merge(ai_routes::ai_routes())
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(trace)
        .layer(cors_layer(config))
        .with_state(state)
}

pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env().context("Failed to read server configuration")?;
    init_tracing(config.json_logs);

    std::panic::set_hook(Box::new(|info| {
        tracing::error!(panic = %info, "Panic in server thread");
    }));

    let state = AppState::default();
    tracing::info!(
        years = ?state.store.years(),
        "Loaded sample financial data"
    );

    let app = build_router(state, &config);
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Finance dashboard API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
