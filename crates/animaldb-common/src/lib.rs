//! animaldb common library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared pieces used by the animaldb workspace members:
//!
//! - **Logging**: tracing subscriber setup driven by environment variables
//! - **Errors**: the error type returned by the shared helpers
//!
//! # Example
//!
//! ```no_run
//! use animaldb_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> animaldb_common::Result<()> {
//!     let config = LogConfig::from_env()?;
//!     init_logging(&config)?;
//!     tracing::info!("logging ready");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

pub use error::{CommonError, Result};
