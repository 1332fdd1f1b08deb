use mediator::Request;
use std::sync::Arc;

use crate::config::UpdateImagePolicy;
use crate::db::{AnimalStore, DbError};
use crate::features::animals::validation::{check_existing_id, check_fields};
use crate::features::shared::FieldErrors;
use crate::models::{AnimalFields, AnimalView};

#[derive(Debug, Clone, Default)]
pub struct UpdateAnimalCommand {
    /// Raw path segment, checked before use
    pub id: String,
    pub name: Option<String>,
    pub scientific: Option<String>,
    pub location: Option<String>,
    /// File name of an image already written by image intake
    pub image: Option<String>,
    pub image_policy: UpdateImagePolicy,
}

/// The record as stored after the update, `None` if it vanished in between
pub type UpdateAnimalResponse = Option<AnimalView>;

#[derive(Debug, thiserror::Error)]
pub enum UpdateAnimalError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<UpdateAnimalResponse, UpdateAnimalError>> for UpdateAnimalCommand {}

impl crate::cqrs::middleware::Command for UpdateAnimalCommand {}

impl UpdateAnimalCommand {
    /// Image value handed to the store
    ///
    /// A fresh upload always wins. Without one, `Clear` stores `""` and
    /// `Preserve` leaves the stored reference alone.
    pub fn image_update(&self) -> Option<String> {
        match (&self.image, self.image_policy) {
            (Some(file), _) => Some(file.clone()),
            (None, UpdateImagePolicy::Clear) => Some(String::new()),
            (None, UpdateImagePolicy::Preserve) => None,
        }
    }
}

#[tracing::instrument(skip(store, command), fields(id = %command.id))]
pub async fn handle(
    store: Arc<dyn AnimalStore>,
    command: UpdateAnimalCommand,
) -> Result<UpdateAnimalResponse, UpdateAnimalError> {
    let mut errors = check_fields(
        command.name.as_deref(),
        command.scientific.as_deref(),
        command.location.as_deref(),
    );
    let id = match check_existing_id(store.as_ref(), &mut errors, &command.id).await? {
        Some(id) if errors.is_empty() => id,
        _ => return Err(UpdateAnimalError::Validation(errors)),
    };

    let image = command.image_update();
    let affected = store
        .update(
            id,
            AnimalFields {
                name: command.name.unwrap_or_default(),
                scientific: command.scientific.unwrap_or_default(),
                location: command.location.unwrap_or_default(),
                image,
            },
        )
        .await?;

    tracing::info!(id, affected, "Animal updated");

    let animal = store.get_by_id(id).await?;
    Ok(animal.map(AnimalView::from))
}
