use mediator::Request;
use std::sync::Arc;

use crate::db::{AnimalStore, DbError};

#[derive(Debug, Clone, Default)]
pub struct DeleteAnimalCommand {
    /// Raw path segment; anything that is not an integer deletes nothing
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAnimalResponse {
    /// `false` when no row matched the id
    pub deleted: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteAnimalError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<DeleteAnimalResponse, DeleteAnimalError>> for DeleteAnimalCommand {}

impl crate::cqrs::middleware::Command for DeleteAnimalCommand {}

impl DeleteAnimalCommand {
    pub fn parsed_id(&self) -> Option<i32> {
        self.id.parse().ok()
    }
}

#[tracing::instrument(skip(store, command), fields(id = %command.id))]
pub async fn handle(
    store: Arc<dyn AnimalStore>,
    command: DeleteAnimalCommand,
) -> Result<DeleteAnimalResponse, DeleteAnimalError> {
    let Some(id) = command.parsed_id() else {
        tracing::warn!("Id is not an integer, nothing deleted");
        return Ok(DeleteAnimalResponse { deleted: false });
    };

    let deleted = store.delete_by_id(id).await?;

    if deleted {
        tracing::info!(id, "Animal deleted");
    } else {
        tracing::warn!(id, "No animal with this id, nothing deleted");
    }

    Ok(DeleteAnimalResponse { deleted })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(id: &str) -> DeleteAnimalCommand {
        DeleteAnimalCommand { id: id.to_string() }
    }

    #[test]
    fn test_parsed_id() {
        assert_eq!(command("7").parsed_id(), Some(7));
        assert_eq!(command("-2").parsed_id(), Some(-2));
        assert_eq!(command("abc").parsed_id(), None);
        assert_eq!(command("1.5").parsed_id(), None);
        assert_eq!(command("").parsed_id(), None);
    }
}
