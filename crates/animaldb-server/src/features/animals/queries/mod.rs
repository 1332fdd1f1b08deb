pub mod get;
pub mod list;

pub use get::{GetAnimalError, GetAnimalQuery, GetAnimalResponse};
pub use list::{ListAnimalsError, ListAnimalsQuery, ListAnimalsResponse};
