//! SocialPulse Web Server
//!
//! Axum-based server for the analysis page and JSON API.

pub mod routes;
pub mod state;
pub mod trend;
pub mod view;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use pulse_core::Analyzer;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/analyze", post(routes::api::analyze))
        .route("/samples", get(routes::api::list_samples))
        .with_state(state.clone());

    Router::new()
        .route("/", get(routes::page::index))
        .route("/analyze", post(routes::page::analyze))
        .route("/health", get(routes::health::health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(analyzer: Analyzer, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(analyzer);
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app).await.context("Web server stopped")?;
    Ok(())
}
