//! HTTP surface of the server
//!
//! [`create_router`] assembles the welcome and health routes, the feature
//! routes, static file serving for everything else, and the middleware stack.

pub mod response;

use axum::{
    extract::{DefaultBodyLimit, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, services::ServeDir};

use crate::config::Config;
use crate::db::AnimalStore;
use crate::error::AppError;
use crate::features;
use crate::middleware;
use crate::storage::ImageStorage;

pub const WELCOME_MESSAGE: &str = "Welcome to animaldb-api, an API for animal database!";

/// Dependencies of the router, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AnimalStore>,
    pub images: ImageStorage,
    pub config: Arc<Config>,
}

/// Create the application router with all routes and middleware
///
/// Requests that match no route fall through to the public directory, so
/// `/img/<file>` serves `<public_dir>/img/<file>`.
pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();

    let feature_state = features::FeatureState {
        store: state.store.clone(),
        images: state.images.clone(),
        update_image_policy: config.uploads.update_image_policy,
    };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .with_state(state)
        .merge(features::router(feature_state))
        .fallback_service(ServeDir::new(&config.uploads.public_dir))
        // Apply layers from innermost to outermost
        .layer(DefaultBodyLimit::max(config.uploads.max_upload_bytes))
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

async fn root() -> &'static str {
    WELCOME_MESSAGE
}

/// Health check handler
async fn health_check(State(state): State<AppState>) -> Result<Response, AppError> {
    match state.store.health_check().await {
        Ok(()) => Ok(Json(json!({
            "status": "healthy",
            "database": "connected"
        }))
        .into_response()),
        Err(e) => {
            tracing::error!("Database health check failed: {:?}", e);
            Err(AppError::Unavailable("Database is not reachable".to_string()))
        },
    }
}
