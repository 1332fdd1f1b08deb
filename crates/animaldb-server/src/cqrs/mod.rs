//! Mediator wiring for the animal commands and queries
//!
//! Every `handle` function is registered against one shared record store, so a
//! caller can dispatch a command or query without knowing where it is handled.

pub use mediator::DefaultAsyncMediator;
use std::sync::Arc;

use crate::db::AnimalStore;
use crate::features::animals::{
    commands::{create, delete, update},
    queries::{get, list},
    CreateAnimalCommand, DeleteAnimalCommand, GetAnimalQuery, ListAnimalsQuery,
    UpdateAnimalCommand,
};

pub mod middleware;

pub type AppMediator = DefaultAsyncMediator;

pub fn build_mediator(store: Arc<dyn AnimalStore>) -> AppMediator {
    DefaultAsyncMediator::builder()
        .add_handler({
            let store = store.clone();
            move |cmd: CreateAnimalCommand| {
                let store = store.clone();
                async move { create::handle(store, cmd).await }
            }
        })
        .add_handler({
            let store = store.clone();
            move |cmd: UpdateAnimalCommand| {
                let store = store.clone();
                async move { update::handle(store, cmd).await }
            }
        })
        .add_handler({
            let store = store.clone();
            move |cmd: DeleteAnimalCommand| {
                let store = store.clone();
                async move { delete::handle(store, cmd).await }
            }
        })
        .add_handler({
            let store = store.clone();
            move |query: ListAnimalsQuery| {
                let store = store.clone();
                async move { list::handle(store, query).await }
            }
        })
        .add_handler({
            let store = store.clone();
            move |query: GetAnimalQuery| {
                let store = store.clone();
                async move { get::handle(store, query).await }
            }
        })
        .build()
}
