use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::event::{name_within_bounds, NAME_LENGTH};
use crate::models::{Event, EventDraft};
use crate::store::{EventStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Rows {
    events: BTreeMap<i64, Event>,
    last_id: i64,
}

/// Process-local store. Ids come from a counter and are never reused.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventStore {
    rows: Arc<RwLock<Rows>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_name(name: &str) -> StoreResult<()> {
    if name_within_bounds(name) {
        Ok(())
    } else {
        Err(StoreError::ConstraintViolation(format!(
            "event name must be between {} and {} characters",
            NAME_LENGTH.start(),
            NAME_LENGTH.end()
        )))
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn save(&self, draft: EventDraft) -> StoreResult<Event> {
        check_name(&draft.name)?;

        let mut rows = self.rows.write().await;
        let now = Utc::now();

        let event = match draft.id {
            None => {
                rows.last_id += 1;
                Event {
                    id: rows.last_id,
                    name: draft.name,
                    description: draft.description,
                    start_date_time: draft.start_date_time,
                    end_date_time: draft.end_date_time,
                    venue_id: draft.venue_id,
                    organizer_id: draft.organizer_id,
                    created_at: now,
                    updated_at: now,
                }
            }
            Some(id) => {
                let existing = rows.events.get(&id).ok_or(StoreError::RowNotFound(id))?;
                Event {
                    id,
                    name: draft.name,
                    description: draft.description,
                    start_date_time: draft.start_date_time,
                    end_date_time: draft.end_date_time,
                    venue_id: draft.venue_id,
                    organizer_id: draft.organizer_id,
                    created_at: existing.created_at,
                    updated_at: now.max(existing.updated_at),
                }
            }
        };

        rows.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Event>> {
        let rows = self.rows.read().await;
        Ok(rows.events.get(&id).cloned())
    }

    async fn find_all(&self) -> StoreResult<Vec<Event>> {
        let rows = self.rows.read().await;
        Ok(rows.events.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let mut rows = self.rows.write().await;
        rows.events.remove(&id);
        Ok(())
    }
}
