use mediator::Request;
use std::sync::Arc;

use crate::db::{AnimalStore, DbError};
use crate::models::AnimalView;

#[derive(Debug, Clone, Default)]
pub struct ListAnimalsQuery;

/// Every stored animal, ordered by id
pub type ListAnimalsResponse = Vec<AnimalView>;

#[derive(Debug, thiserror::Error)]
pub enum ListAnimalsError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<ListAnimalsResponse, ListAnimalsError>> for ListAnimalsQuery {}

impl crate::cqrs::middleware::Query for ListAnimalsQuery {}

#[tracing::instrument(skip(store, _query))]
pub async fn handle(
    store: Arc<dyn AnimalStore>,
    _query: ListAnimalsQuery,
) -> Result<ListAnimalsResponse, ListAnimalsError> {
    let animals = store.list_all().await?;
    tracing::debug!(count = animals.len(), "Listed animals");
    Ok(animals.into_iter().map(AnimalView::from).collect())
}
