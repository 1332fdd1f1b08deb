pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateAnimalCommand, CreateAnimalError, CreateAnimalResponse};
pub use delete::{DeleteAnimalCommand, DeleteAnimalError, DeleteAnimalResponse};
pub use update::{UpdateAnimalCommand, UpdateAnimalError, UpdateAnimalResponse};
