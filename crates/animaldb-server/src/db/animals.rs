//! Record store for the `animals` table

use async_trait::async_trait;
use sqlx::PgPool;

use super::DbResult;
use crate::models::{Animal, AnimalFields};

/// Persistence contract for animal records
///
/// Absence is never an error: `get_by_id` returns `None`, `update` reports the
/// affected row count and `delete_by_id` reports whether a row went away.
#[async_trait]
pub trait AnimalStore: Send + Sync {
    async fn list_all(&self) -> DbResult<Vec<Animal>>;

    async fn get_by_id(&self, id: i32) -> DbResult<Option<Animal>>;

    /// Insert a record; a `None` image is stored as the empty string
    async fn create(&self, fields: AnimalFields) -> DbResult<Animal>;

    /// Overwrite the record; a `None` image keeps the stored reference
    async fn update(&self, id: i32, fields: AnimalFields) -> DbResult<u64>;

    async fn delete_by_id(&self, id: i32) -> DbResult<bool>;

    async fn health_check(&self) -> DbResult<()> {
        Ok(())
    }
}

/// PostgreSQL-backed [`AnimalStore`]
#[derive(Clone)]
pub struct PgAnimalStore {
    pool: PgPool,
}

impl PgAnimalStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnimalStore for PgAnimalStore {
    #[tracing::instrument(skip(self))]
    async fn list_all(&self) -> DbResult<Vec<Animal>> {
        let animals = sqlx::query_as::<_, Animal>(
            r#"
            SELECT id, name, scientific, location, image
            FROM animals
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(animals)
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: i32) -> DbResult<Option<Animal>> {
        let animal = sqlx::query_as::<_, Animal>(
            r#"
            SELECT id, name, scientific, location, image
            FROM animals
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(animal)
    }

    #[tracing::instrument(skip(self, record), fields(name = %record.name))]
    async fn create(&self, record: AnimalFields) -> DbResult<Animal> {
        let animal = sqlx::query_as::<_, Animal>(
            r#"
            INSERT INTO animals (name, scientific, location, image)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, scientific, location, image
            "#,
        )
        .bind(record.name)
        .bind(record.scientific)
        .bind(record.location)
        .bind(record.image.unwrap_or_default())
        .fetch_one(&self.pool)
        .await?;

        Ok(animal)
    }

    #[tracing::instrument(skip(self, record), fields(name = %record.name))]
    async fn update(&self, id: i32, record: AnimalFields) -> DbResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE animals
            SET name = $2,
                scientific = $3,
                location = $4,
                image = COALESCE($5, image)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(record.name)
        .bind(record.scientific)
        .bind(record.location)
        .bind(record.image)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_by_id(&self, id: i32) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM animals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() >= 1)
    }

    async fn health_check(&self) -> DbResult<()> {
        super::health_check(&self.pool).await
    }
}
