use mediator::Request;
use std::sync::Arc;

use crate::db::{AnimalStore, DbError};
use crate::models::AnimalView;

#[derive(Debug, Clone, Default)]
pub struct GetAnimalQuery {
    /// Raw path segment; anything that is not an integer finds nothing
    pub id: String,
}

pub type GetAnimalResponse = Option<AnimalView>;

#[derive(Debug, thiserror::Error)]
pub enum GetAnimalError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<GetAnimalResponse, GetAnimalError>> for GetAnimalQuery {}

impl crate::cqrs::middleware::Query for GetAnimalQuery {}

impl GetAnimalQuery {
    pub fn parsed_id(&self) -> Option<i32> {
        self.id.parse().ok()
    }
}

#[tracing::instrument(skip(store))]
pub async fn handle(
    store: Arc<dyn AnimalStore>,
    query: GetAnimalQuery,
) -> Result<GetAnimalResponse, GetAnimalError> {
    let Some(id) = query.parsed_id() else {
        tracing::debug!(id = %query.id, "Id is not an integer, nothing to look up");
        return Ok(None);
    };

    let animal = store.get_by_id(id).await?;
    Ok(animal.map(AnimalView::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(id: &str) -> GetAnimalQuery {
        GetAnimalQuery { id: id.to_string() }
    }

    #[test]
    fn test_parsed_id() {
        assert_eq!(query("42").parsed_id(), Some(42));
        assert_eq!(query("-3").parsed_id(), Some(-3));
        assert_eq!(query("abc").parsed_id(), None);
        assert_eq!(query("1.5").parsed_id(), None);
        assert_eq!(query("99999999999").parsed_id(), None);
    }
}
