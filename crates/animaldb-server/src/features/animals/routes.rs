//! Animal API routes
//!
//! # Route Structure
//!
//! - `GET /animals` - List every animal
//! - `POST /animals` - Create an animal (optional `image` upload)
//! - `GET /animals/:id` - Get one animal, `null` when there is none
//! - `PUT /animals/:id` - Replace an animal's fields (optional `image` upload)
//! - `DELETE /animals/:id` - Delete an animal
//!
//! The collection routes also answer on `/animals/`.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use super::{
    commands::{
        CreateAnimalCommand, CreateAnimalError, DeleteAnimalCommand, DeleteAnimalError,
        UpdateAnimalCommand, UpdateAnimalError,
    },
    form::AnimalPayload,
    queries::{GetAnimalError, GetAnimalQuery, ListAnimalsError, ListAnimalsQuery},
};
use crate::api::response::{StatusResponse, ValidationErrorResponse};
use crate::error::AppError;
use crate::features::shared::FieldErrors;
use crate::features::FeatureState;
use crate::storage::{ImageIntakeError, ImageStorage, UploadedImage};

pub const MESSAGE_ADDED: &str = "Animal added";
pub const MESSAGE_UPDATED: &str = "Animal updated";
pub const MESSAGE_DELETED: &str = "Animal deleted";
pub const MESSAGE_DELETE_FAILED: &str = "Failed";

// ============================================================================
// Router Configuration
// ============================================================================

pub fn animals_routes() -> Router<FeatureState> {
    Router::new()
        .route("/animals", get(list_animals).post(create_animal))
        .route("/animals/", get(list_animals).post(create_animal))
        .route(
            "/animals/:id",
            get(get_animal).put(update_animal).delete(delete_animal),
        )
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Create an animal
///
/// The upload, if any, is written to disk before the fields are validated.
///
/// - `200 OK` - `{"status": "success", "message": "Animal added", "data": {...}}`
/// - `422 Unprocessable Entity` - `{"errors": {...}}`
#[tracing::instrument(skip(state, payload))]
async fn create_animal(
    State(state): State<FeatureState>,
    payload: AnimalPayload,
) -> Result<Response, AnimalApiError> {
    let image = intake(&state.images, payload.image).await?;

    let command = CreateAnimalCommand {
        name: payload.form.name,
        scientific: payload.form.scientific,
        location: payload.form.location,
        image,
    };

    let animal = super::commands::create::handle(state.store.clone(), command).await?;

    Ok(StatusResponse::success(MESSAGE_ADDED, animal).into_response())
}

/// Replace the fields of an existing animal
///
/// - `200 OK` - `{"status": "success", "message": "Animal updated", "data": {...}}`
/// - `422 Unprocessable Entity` - invalid fields or unknown id
#[tracing::instrument(skip(state, payload), fields(id = %id))]
async fn update_animal(
    State(state): State<FeatureState>,
    Path(id): Path<String>,
    payload: AnimalPayload,
) -> Result<Response, AnimalApiError> {
    let image = intake(&state.images, payload.image).await?;

    let command = UpdateAnimalCommand {
        id,
        name: payload.form.name,
        scientific: payload.form.scientific,
        location: payload.form.location,
        image,
        image_policy: state.update_image_policy,
    };

    let animal = super::commands::update::handle(state.store.clone(), command).await?;

    Ok(StatusResponse::success(MESSAGE_UPDATED, animal).into_response())
}

/// Delete an animal
///
/// The id is not validated. An id that matches no row, or is not an integer,
/// answers `200 OK` with status `"error"` and message `"Failed"`.
///
/// - `200 OK` - `{"status": "success", "message": "Animal deleted", "data": null}`
#[tracing::instrument(skip(state), fields(id = %id))]
async fn delete_animal(
    State(state): State<FeatureState>,
    Path(id): Path<String>,
) -> Result<Response, AnimalApiError> {
    let command = DeleteAnimalCommand { id };

    let response = super::commands::delete::handle(state.store.clone(), command).await?;

    let body = if response.deleted {
        StatusResponse::success(MESSAGE_DELETED, ())
    } else {
        StatusResponse::error(MESSAGE_DELETE_FAILED, ())
    };

    Ok(body.into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// List every animal as a bare JSON array
#[tracing::instrument(skip(state))]
async fn list_animals(State(state): State<FeatureState>) -> Result<Response, AnimalApiError> {
    let animals = super::queries::list::handle(state.store.clone(), ListAnimalsQuery).await?;
    Ok(Json(animals).into_response())
}

/// Get one animal as a bare JSON object, or `null`
#[tracing::instrument(skip(state), fields(id = %id))]
async fn get_animal(
    State(state): State<FeatureState>,
    Path(id): Path<String>,
) -> Result<Response, AnimalApiError> {
    let animal = super::queries::get::handle(state.store.clone(), GetAnimalQuery { id }).await?;
    Ok(Json(animal).into_response())
}

async fn intake(
    images: &ImageStorage,
    upload: Option<UploadedImage>,
) -> Result<Option<String>, ImageIntakeError> {
    match upload {
        Some(upload) => images.store(upload).await.map(Some),
        None => Ok(None),
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for the animal routes
#[derive(Debug, thiserror::Error)]
pub enum AnimalApiError {
    #[error(transparent)]
    Create(#[from] CreateAnimalError),
    #[error(transparent)]
    Update(#[from] UpdateAnimalError),
    #[error(transparent)]
    Delete(#[from] DeleteAnimalError),
    #[error(transparent)]
    Get(#[from] GetAnimalError),
    #[error(transparent)]
    List(#[from] ListAnimalsError),
    #[error(transparent)]
    ImageIntake(#[from] ImageIntakeError),
}

impl IntoResponse for AnimalApiError {
    fn into_response(self) -> Response {
        let app_error = match self {
            AnimalApiError::Create(CreateAnimalError::Validation(errors))
            | AnimalApiError::Update(UpdateAnimalError::Validation(errors)) => {
                return validation_response(errors);
            },
            AnimalApiError::Create(CreateAnimalError::Database(e))
            | AnimalApiError::Update(UpdateAnimalError::Database(e))
            | AnimalApiError::Delete(DeleteAnimalError::Database(e))
            | AnimalApiError::Get(GetAnimalError::Database(e))
            | AnimalApiError::List(ListAnimalsError::Database(e)) => AppError::Database(e),
            AnimalApiError::ImageIntake(e) => AppError::ImageIntake(e),
        };

        app_error.into_response()
    }
}

fn validation_response(errors: FieldErrors) -> Response {
    tracing::debug!(fields = %errors, "Request failed validation");
    ValidationErrorResponse { errors }.into_response()
}
