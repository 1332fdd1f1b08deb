//! Shared validation utilities
//!
//! Validation collects every failing field of a request instead of stopping at
//! the first one. Each field reports at most one error (the first check it
//! failed), keyed by field name:
//!
//! ```json
//! {
//!   "name": { "location": "body", "param": "name", "value": "L", "msg": "Invalid value" },
//!   "id":   { "location": "params", "param": "id", "value": "42", "msg": "id not found" }
//! }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use animaldb_server::features::shared::validation::{check_min_length, FieldErrors, FieldLocation};
//!
//! let mut errors = FieldErrors::new();
//! check_min_length(&mut errors, FieldLocation::Body, "name", Some("L"), 2);
//! assert!(errors.contains("name"));
//! ```

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Message used for shape failures (too short, missing, not numeric)
pub const INVALID_VALUE: &str = "Invalid value";

// Literal pattern, always compiles
#[allow(clippy::unwrap_used)]
static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").unwrap());

/// Part of the request a field was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldLocation {
    Body,
    Params,
}

/// A single field failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub location: FieldLocation,
    pub param: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub msg: String,
}

impl FieldError {
    pub fn new(
        location: FieldLocation,
        param: impl Into<String>,
        value: Option<&str>,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            location,
            param: param.into(),
            value: value.map(str::to_string),
            msg: msg.into(),
        }
    }
}

/// All field failures of one request, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure; a field that already failed keeps its first error
    pub fn push(&mut self, error: FieldError) {
        self.0.entry(error.param.clone()).or_insert(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when nothing failed, the collected errors otherwise
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for FieldErrors {}

/// Require `value` to be present and at least `min` characters long
///
/// Absent values are checked as the empty string. Length counts Unicode
/// scalar values, not bytes. Returns `true` when the check passed.
pub fn check_min_length(
    errors: &mut FieldErrors,
    location: FieldLocation,
    param: &str,
    value: Option<&str>,
    min: usize,
) -> bool {
    let length = value.map(|v| v.chars().count()).unwrap_or(0);
    if length < min {
        errors.push(FieldError::new(location, param, value, INVALID_VALUE));
        return false;
    }
    true
}

/// Require `value` to look like a number: optional sign, optional fraction
///
/// Returns `true` when the check passed.
pub fn check_numeric(
    errors: &mut FieldErrors,
    location: FieldLocation,
    param: &str,
    value: &str,
) -> bool {
    if !is_numeric(value) {
        errors.push(FieldError::new(location, param, Some(value), INVALID_VALUE));
        return false;
    }
    true
}

pub fn is_numeric(value: &str) -> bool {
    NUMERIC.is_match(value)
}
