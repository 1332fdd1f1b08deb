//! animaldb server library
//!
//! HTTP API for a small database of animals: create, read, update and delete
//! records, attach an uploaded image to each, and serve those images back as
//! static files.
//!
//! # Architecture
//!
//! - **Commands** (create, update, delete) and **Queries** (list, get) are plain
//!   structs handled by `handle` functions in [`features::animals`], registered
//!   with a mediator in [`cqrs`]
//! - Persistence goes through the [`db::AnimalStore`] trait, backed by
//!   PostgreSQL in production
//! - Uploaded images land in the public directory via [`storage::ImageStorage`]
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use animaldb_server::{api, config::Config, db, storage::ImageStorage};
//!
//! let config = Config::load()?;
//! let pool = db::create_pool(&config.database).await?;
//! let images = ImageStorage::init(config.uploads.image_dir()).await?;
//! let app = api::create_router(api::AppState {
//!     store: Arc::new(db::PgAnimalStore::new(pool)),
//!     images,
//!     config: Arc::new(config),
//! });
//! ```

pub mod api;
pub mod config;
pub mod cqrs;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;
pub mod models;
pub mod storage;

pub use config::Config;
pub use error::AppError;
