//! Request checks shared by the animal commands

use crate::db::{AnimalStore, DbResult};
use crate::features::shared::validation::{
    check_min_length, check_numeric, FieldError, FieldErrors, FieldLocation,
};

/// Minimum number of characters for `name`, `scientific` and `location`
pub const MIN_FIELD_LENGTH: usize = 2;

/// Message reported when the path id does not resolve to a record
pub const ID_NOT_FOUND: &str = "id not found";

/// Check the three text fields of a create or update request
pub fn check_fields(
    name: Option<&str>,
    scientific: Option<&str>,
    location: Option<&str>,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_min_length(&mut errors, FieldLocation::Body, "name", name, MIN_FIELD_LENGTH);
    check_min_length(&mut errors, FieldLocation::Body, "scientific", scientific, MIN_FIELD_LENGTH);
    check_min_length(&mut errors, FieldLocation::Body, "location", location, MIN_FIELD_LENGTH);
    errors
}

/// Check the path id and resolve it against the store
///
/// Returns the id when it names an existing record. Otherwise an `id` error
/// has been recorded and `None` is returned. The store is only consulted once
/// the id passed the shape checks.
pub async fn check_existing_id(
    store: &dyn AnimalStore,
    errors: &mut FieldErrors,
    raw_id: &str,
) -> DbResult<Option<i32>> {
    if !check_min_length(errors, FieldLocation::Params, "id", Some(raw_id), 1)
        || !check_numeric(errors, FieldLocation::Params, "id", raw_id)
    {
        return Ok(None);
    }

    let found = match raw_id.parse::<i32>() {
        Ok(id) => store.get_by_id(id).await?.map(|animal| animal.id),
        Err(_) => None,
    };

    if found.is_none() {
        errors.push(FieldError::new(
            FieldLocation::Params,
            "id",
            Some(raw_id),
            ID_NOT_FOUND,
        ));
    }

    Ok(found)
}
