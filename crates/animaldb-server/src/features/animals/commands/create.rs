use mediator::Request;
use std::sync::Arc;

use crate::db::{AnimalStore, DbError};
use crate::features::animals::validation::check_fields;
use crate::features::shared::FieldErrors;
use crate::models::{AnimalFields, AnimalView};

#[derive(Debug, Clone, Default)]
pub struct CreateAnimalCommand {
    pub name: Option<String>,
    pub scientific: Option<String>,
    pub location: Option<String>,
    /// File name of an image already written by image intake
    pub image: Option<String>,
}

pub type CreateAnimalResponse = AnimalView;

#[derive(Debug, thiserror::Error)]
pub enum CreateAnimalError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<CreateAnimalResponse, CreateAnimalError>> for CreateAnimalCommand {}

impl crate::cqrs::middleware::Command for CreateAnimalCommand {}

impl CreateAnimalCommand {
    pub fn validate(&self) -> Result<(), CreateAnimalError> {
        check_fields(
            self.name.as_deref(),
            self.scientific.as_deref(),
            self.location.as_deref(),
        )
        .into_result()
        .map_err(CreateAnimalError::Validation)
    }
}

#[tracing::instrument(skip(store, command))]
pub async fn handle(
    store: Arc<dyn AnimalStore>,
    command: CreateAnimalCommand,
) -> Result<CreateAnimalResponse, CreateAnimalError> {
    command.validate()?;

    let animal = store
        .create(AnimalFields {
            name: command.name.unwrap_or_default(),
            scientific: command.scientific.unwrap_or_default(),
            location: command.location.unwrap_or_default(),
            image: command.image,
        })
        .await?;

    tracing::info!(id = animal.id, image = %animal.image, "Animal created");

    Ok(AnimalView::from(animal))
}
