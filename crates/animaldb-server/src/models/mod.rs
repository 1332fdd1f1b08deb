//! Database models

use serde::Serialize;
use sqlx::FromRow;

use crate::config::IMAGE_PREFIX;

/// A row of the `animals` table as stored
///
/// `image` holds the bare file name (or an empty string), never the URL prefix.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Animal {
    pub id: i32,
    pub name: String,
    pub scientific: String,
    pub location: String,
    pub image: String,
}

/// Field values written by create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimalFields {
    pub name: String,
    pub scientific: String,
    pub location: String,
    /// `None` leaves the stored image untouched on update; create stores `""`
    pub image: Option<String>,
}

/// Wire representation of an [`Animal`]
///
/// The image reference is rendered as a path under [`IMAGE_PREFIX`], so an
/// animal without an image shows up as `"/img/"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimalView {
    pub id: i32,
    pub name: String,
    pub scientific: String,
    pub location: String,
    pub image: String,
}

impl From<Animal> for AnimalView {
    fn from(animal: Animal) -> Self {
        Self {
            id: animal.id,
            name: animal.name,
            scientific: animal.scientific,
            location: animal.location,
            image: format!("{}{}", IMAGE_PREFIX, animal.image),
        }
    }
}

impl From<&Animal> for AnimalView {
    fn from(animal: &Animal) -> Self {
        Self::from(animal.clone())
    }
}
