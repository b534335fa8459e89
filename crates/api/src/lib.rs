//! HTTP API server with observability for the HR materialized views.
//!
//! Serves the employee views built at startup, with structured logging
//! (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod seed;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use document_store::DocumentStore;
use metrics_exporter_prometheus::PrometheusHandle;
use projections::{HrApp, Result, WritePolicy};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::views::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: DocumentStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check::<S>))
        .route(
            "/views/employees-with-city",
            get(routes::views::employees_with_city::<S>),
        )
        .route(
            "/views/employees-with-position",
            get(routes::views::employees_with_position::<S>),
        )
        .route("/entities", post(routes::entities::update::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Initializes the HR application over a store and wraps it in shared state.
pub async fn create_state<S: DocumentStore + 'static>(
    store: S,
    policy: WritePolicy,
) -> Result<Arc<AppState<S>>> {
    let app = HrApp::create(store, policy).await?;
    Ok(Arc::new(AppState::new(app)))
}
