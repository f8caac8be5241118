//! Event Map Server Library
//!
//! A map-based event catalog whose administrator-facing core is the
//! event-to-document synchronization engine: the current event list is
//! rendered to Markdown and mirrored into a GitHub repository.
//!
//! # Modules
//!
//! - `events`: the catalog model and snapshot store
//! - `sync`: renderer, change detection, credentials, remote store,
//!   orchestrator
//! - `routes`: HTTP boundary (health, trigger, diagnostics)

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod routes;
pub mod state;
pub mod sync;

use state::AppState;

/// Build the application router with its middleware stack.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/v1/health", get(routes::health::health_check))
        .nest("/api/v1/sync", routes::sync::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
