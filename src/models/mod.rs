pub mod event;
pub mod event_model;

pub use event::{Event, EventDraft};
pub use event_model::EventModel;
