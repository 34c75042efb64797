use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::event::Event;

/// Wire shape of an event. Every field is optional so the same type serves
/// create bodies, partial updates and responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventModel {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub venue_id: Option<i64>,
    #[serde(default)]
    pub organizer_id: Option<i64>,
}

impl From<Event> for EventModel {
    fn from(event: Event) -> Self {
        Self {
            id: Some(event.id),
            name: Some(event.name),
            description: event.description,
            start_date_time: event.start_date_time,
            end_date_time: event.end_date_time,
            venue_id: event.venue_id,
            organizer_id: event.organizer_id,
        }
    }
}
