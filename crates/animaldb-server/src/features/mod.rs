//! Feature modules implementing the animaldb API
//!
//! Each feature is a vertical slice following the CQRS pattern:
//! - `commands/` - Write operations (create, update, delete)
//! - `queries/` - Read operations (get, list)
//! - `routes.rs` - HTTP route definitions
//!
//! Commands and queries implement the mediator pattern using the `mediator` crate.

pub mod animals;
pub mod shared;

use axum::Router;
use std::sync::Arc;

use crate::config::UpdateImagePolicy;
use crate::db::AnimalStore;
use crate::storage::ImageStorage;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// Record store backing the animals resource
    pub store: Arc<dyn AnimalStore>,
    /// Directory receiving uploaded images
    pub images: ImageStorage,
    /// What an update without a new image does to the stored reference
    pub update_image_policy: UpdateImagePolicy,
}

/// Creates the router with all feature routes mounted
///
/// The animals routes answer both with and without a trailing slash on the
/// collection path (`/animals` and `/animals/`).
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .merge(animals::animals_routes())
        .with_state(state)
}
