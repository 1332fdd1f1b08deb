pub mod commands;
pub mod form;
pub mod queries;
pub mod routes;
pub mod validation;

pub use commands::{
    CreateAnimalCommand, CreateAnimalError, CreateAnimalResponse, DeleteAnimalCommand,
    DeleteAnimalError, DeleteAnimalResponse, UpdateAnimalCommand, UpdateAnimalError,
    UpdateAnimalResponse,
};

pub use queries::{
    GetAnimalError, GetAnimalQuery, GetAnimalResponse, ListAnimalsError, ListAnimalsQuery,
    ListAnimalsResponse,
};

pub use form::{AnimalForm, AnimalPayload};
pub use routes::animals_routes;
