use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Allowed length of an event name, counted in characters.
pub const NAME_LENGTH: std::ops::RangeInclusive<usize> = 3..=30;

/// A persisted event row. `id`, `created_at` and `updated_at` are owned by the store.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Event {
    pub id: i64,
    #[sqlx(rename = "event_name")]
    pub name: String,
    #[sqlx(rename = "event_description")]
    pub description: Option<String>,
    pub start_date_time: Option<DateTime<Utc>>,
    pub end_date_time: Option<DateTime<Utc>>,
    #[sqlx(rename = "event_venue")]
    pub venue_id: Option<i64>,
    #[sqlx(rename = "event_organizer")]
    pub organizer_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The writable columns of an event, handed to `EventStore::save`.
///
/// A draft without an id is inserted; a draft with an id overwrites that row.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub start_date_time: Option<DateTime<Utc>>,
    pub end_date_time: Option<DateTime<Utc>>,
    pub venue_id: Option<i64>,
    pub organizer_id: Option<i64>,
}

impl From<Event> for EventDraft {
    fn from(event: Event) -> Self {
        Self {
            id: Some(event.id),
            name: event.name,
            description: event.description,
            start_date_time: event.start_date_time,
            end_date_time: event.end_date_time,
            venue_id: event.venue_id,
            organizer_id: event.organizer_id,
        }
    }
}

/// Returns true when `name` satisfies the stored length constraint.
pub fn name_within_bounds(name: &str) -> bool {
    NAME_LENGTH.contains(&name.chars().count())
}
