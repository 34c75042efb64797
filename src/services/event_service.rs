use std::sync::Arc;
use thiserror::Error;

use crate::models::{EventDraft, EventModel};
use crate::services::merge::merge_into;
use crate::store::{EventStore, StoreError};

const RESOURCE_EVENT: &str = "Event";
const FIELD_ID: &str = "ID";

#[derive(Debug, Error)]
pub enum EventError {
    #[error("{resource} not found with {field} : {value}")]
    ResourceNotFound {
        resource: &'static str,
        field: &'static str,
        value: i64,
    },

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EventError {
    fn event_not_found(id: i64) -> Self {
        EventError::ResourceNotFound {
            resource: RESOURCE_EVENT,
            field: FIELD_ID,
            value: id,
        }
    }
}

pub type EventResult<T> = Result<T, EventError>;

/// Converts between the wire model and stored events, and owns the not-found
/// and partial-update semantics.
pub struct EventService<S: EventStore> {
    store: Arc<S>,
}

impl<S: EventStore> Clone for EventService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: EventStore> EventService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub async fn create_event(&self, model: EventModel) -> EventResult<EventModel> {
        let draft = draft_from_model(model)?;
        let event = self.store.save(draft).await?;

        tracing::info!(event_id = event.id, "Created event");
        Ok(event.into())
    }

    pub async fn get_event(&self, id: i64) -> EventResult<EventModel> {
        let event = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| EventError::event_not_found(id))?;

        tracing::debug!(event_id = id, "Fetched event");
        Ok(event.into())
    }

    /// All events in store order.
    pub async fn get_all_events(&self) -> EventResult<Vec<EventModel>> {
        let events = self.store.find_all().await?;

        tracing::debug!(count = events.len(), "Fetched all events");
        Ok(events.into_iter().map(EventModel::from).collect())
    }

    /// Merges the non-empty fields of `model` into the stored event and saves
    /// it. The save happens even when nothing changed, refreshing `updated_at`.
    pub async fn update_event(&self, id: i64, model: EventModel) -> EventResult<EventModel> {
        let mut event = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| EventError::event_not_found(id))?;

        let applied = merge_into(&mut event, &model);
        let saved = self.store.save(EventDraft::from(event)).await?;

        tracing::info!(event_id = id, fields = ?applied, "Updated event");
        Ok(saved.into())
    }

    pub async fn delete_event(&self, id: i64) -> EventResult<String> {
        if self.store.find_by_id(id).await?.is_none() {
            return Err(EventError::event_not_found(id));
        }
        self.store.delete_by_id(id).await?;

        tracing::info!(event_id = id, "Deleted event");
        Ok(format!("Event with id {} deleted successfully", id))
    }
}

/// A client-supplied id is dropped: ids are only ever assigned by the store.
fn draft_from_model(model: EventModel) -> EventResult<EventDraft> {
    let name = model
        .name
        .ok_or_else(|| EventError::Validation("Event name is required".to_string()))?;

    Ok(EventDraft {
        id: None,
        name,
        description: model.description,
        start_date_time: model.start_date_time,
        end_date_time: model.end_date_time,
        venue_id: model.venue_id,
        organizer_id: model.organizer_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Event;
    use crate::store::MockEventStore;
    use chrono::{TimeZone, Utc};
    use mockall::predicate::{always, eq};

    fn stored(id: i64) -> Event {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        Event {
            id,
            name: "Spring Gala".to_string(),
            description: Some("Annual".to_string()),
            start_date_time: Some(at),
            end_date_time: None,
            venue_id: Some(5),
            organizer_id: Some(6),
            created_at: at,
            updated_at: at,
        }
    }

    fn saved_from(draft: EventDraft, id: i64) -> Event {
        let at = Utc.with_ymd_and_hms(2024, 3, 2, 8, 0, 0).unwrap();
        Event {
            id,
            name: draft.name,
            description: draft.description,
            start_date_time: draft.start_date_time,
            end_date_time: draft.end_date_time,
            venue_id: draft.venue_id,
            organizer_id: draft.organizer_id,
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn test_create_drops_client_id_and_returns_generated_one() {
        let mut store = MockEventStore::new();
        store
            .expect_save()
            .withf(|draft| draft.id.is_none() && draft.name == "Launch")
            .times(1)
            .returning(|draft| Ok(saved_from(draft, 12)));

        let service = EventService::new(store);
        let created = service
            .create_event(EventModel {
                id: Some(999),
                name: Some("Launch".to_string()),
                venue_id: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(created.id, Some(12));
        assert_eq!(created.venue_id, Some(1));
    }

    #[tokio::test]
    async fn test_create_without_name_never_reaches_store() {
        let mut store = MockEventStore::new();
        store.expect_save().times(0);

        let service = EventService::new(store);
        let result = service.create_event(EventModel::default()).await;

        assert!(matches!(result, Err(EventError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_missing_event_is_resource_not_found() {
        let mut store = MockEventStore::new();
        store
            .expect_find_by_id()
            .with(eq(404))
            .returning(|_| Ok(None));

        let service = EventService::new(store);
        let err = service.get_event(404).await.unwrap_err();

        match err {
            EventError::ResourceNotFound {
                resource,
                field,
                value,
            } => {
                assert_eq!(resource, "Event");
                assert_eq!(field, "ID");
                assert_eq!(value, 404);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_with_empty_body_still_saves() {
        let mut store = MockEventStore::new();
        store
            .expect_find_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(stored(id))));
        store
            .expect_save()
            .withf(|draft| draft.id == Some(1) && draft.name == "Spring Gala")
            .times(1)
            .returning(|draft| Ok(saved_from(draft, 1)));

        let service = EventService::new(store);
        let updated = service.update_event(1, EventModel::default()).await.unwrap();

        assert_eq!(updated.name.as_deref(), Some("Spring Gala"));
        assert_eq!(updated.description.as_deref(), Some("Annual"));
    }

    #[tokio::test]
    async fn test_update_missing_event_is_resource_not_found() {
        let mut store = MockEventStore::new();
        store.expect_find_by_id().with(always()).returning(|_| Ok(None));
        store.expect_save().times(0);

        let service = EventService::new(store);
        let result = service.update_event(8, EventModel::default()).await;

        assert!(matches!(
            result,
            Err(EventError::ResourceNotFound { value: 8, .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_event_is_resource_not_found() {
        let mut store = MockEventStore::new();
        store.expect_find_by_id().returning(|_| Ok(None));
        store.expect_delete_by_id().times(0);

        let service = EventService::new(store);
        let result = service.delete_event(3).await;

        assert!(matches!(
            result,
            Err(EventError::ResourceNotFound { value: 3, .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_returns_confirmation() {
        let mut store = MockEventStore::new();
        store
            .expect_find_by_id()
            .returning(|id| Ok(Some(stored(id))));
        store
            .expect_delete_by_id()
            .with(eq(4))
            .times(1)
            .returning(|_| Ok(()));

        let service = EventService::new(store);
        let message = service.delete_event(4).await.unwrap();

        assert_eq!(message, "Event with id 4 deleted successfully");
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut store = MockEventStore::new();
        store
            .expect_find_all()
            .returning(|| Err(StoreError::Database(sqlx::Error::PoolTimedOut)));

        let service = EventService::new(store);
        let result = service.get_all_events().await;

        assert!(matches!(result, Err(EventError::Store(_))));
    }
}
