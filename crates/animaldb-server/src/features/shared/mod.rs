//! Shared utilities and types for feature modules
//!
//! - **validation**: field error collection and the shape checks used by every
//!   mutating request

pub mod validation;

pub use validation::{FieldError, FieldErrors, FieldLocation};
