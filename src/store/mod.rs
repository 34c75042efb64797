//! Persistence port for events.
//!
//! The service depends only on [`EventStore`]. Two adapters ship with the crate:
//! [`PgEventStore`] over a sqlx `PgPool`, and [`InMemoryEventStore`] for tests
//! and database-less runs.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Event, EventDraft};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryEventStore;
pub use postgres::PgEventStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A column constraint rejected the row, e.g. an out-of-range name length.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// An overwrite targeted an id that has no row.
    #[error("No event row with id {0}")]
    RowNotFound(i64),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Insert a draft without id, or overwrite every writable column of the row
    /// with the draft's id. Either way `updated_at` is refreshed.
    async fn save(&self, draft: EventDraft) -> StoreResult<Event>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Event>>;

    /// All rows, ordered by id.
    async fn find_all(&self) -> StoreResult<Vec<Event>>;

    /// Remove the row. Absent ids are ignored.
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;
}
