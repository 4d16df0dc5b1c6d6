pub mod config;
pub mod engine;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod report;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;

pub use crate::services::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let timeout = state.config.request_timeout();

    // outermost first: the request log also covers timed-out requests
    let layers = ServiceBuilder::new()
        .layer(axum::middleware::from_fn(middleware::request_logging))
        .layer(TimeoutLayer::new(timeout));

    Router::new()
        .route("/api/v1/calculate", post(handlers::calculate::calculate))
        .route("/api/v1/generate-form", get(handlers::form::generate_form))
        .route("/form/:token", get(handlers::form::form_page))
        .route("/openapi.json", get(handlers::openapi::openapi_document))
        .route("/health", get(handlers::health::health_check))
        .with_state(state)
        .layer(layers)
}
