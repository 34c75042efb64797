//! Event CRUD service: an axum HTTP surface over an [`EventService`] that
//! talks to storage only through the [`EventStore`] port.

pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

pub use services::{EventError, EventService};
pub use store::{EventStore, InMemoryEventStore, PgEventStore};
