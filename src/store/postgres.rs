use async_trait::async_trait;
use sqlx::error::ErrorKind;
use sqlx::PgPool;

use crate::models::{Event, EventDraft};
use crate::store::{EventStore, StoreError, StoreResult};

const EVENT_COLUMNS: &str = "id, event_name, event_description, start_date_time, end_date_time, \
     event_venue, event_organizer, created_at, updated_at";

/// `events` table access over a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    if let Some(db_err) = err.as_database_error() {
        match db_err.kind() {
            ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                return StoreError::ConstraintViolation(db_err.message().to_string());
            }
            _ => {}
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn save(&self, draft: EventDraft) -> StoreResult<Event> {
        match draft.id {
            None => {
                let sql = format!(
                    "INSERT INTO events (event_name, event_description, start_date_time, \
                     end_date_time, event_venue, event_organizer) \
                     VALUES ($1, $2, $3, $4, $5, $6) RETURNING {EVENT_COLUMNS}"
                );
                let event = sqlx::query_as::<_, Event>(&sql)
                    .bind(&draft.name)
                    .bind(&draft.description)
                    .bind(draft.start_date_time)
                    .bind(draft.end_date_time)
                    .bind(draft.venue_id)
                    .bind(draft.organizer_id)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

                tracing::debug!(event_id = event.id, "Inserted event row");
                Ok(event)
            }
            Some(id) => {
                let sql = format!(
                    "UPDATE events SET event_name = $2, event_description = $3, \
                     start_date_time = $4, end_date_time = $5, event_venue = $6, \
                     event_organizer = $7, updated_at = GREATEST(NOW(), updated_at) \
                     WHERE id = $1 RETURNING {EVENT_COLUMNS}"
                );
                let event = sqlx::query_as::<_, Event>(&sql)
                    .bind(id)
                    .bind(&draft.name)
                    .bind(&draft.description)
                    .bind(draft.start_date_time)
                    .bind(draft.end_date_time)
                    .bind(draft.venue_id)
                    .bind(draft.organizer_id)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?
                    .ok_or(StoreError::RowNotFound(id))?;

                tracing::debug!(event_id = event.id, "Overwrote event row");
                Ok(event)
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Event>> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");
        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(event)
    }

    async fn find_all(&self) -> StoreResult<Vec<Event>> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY id");
        let events = sqlx::query_as::<_, Event>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(events)
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(event_id = id, "Delete matched no event row");
        }
        Ok(())
    }
}
