pub mod event_service;
pub mod merge;

pub use event_service::{EventError, EventResult, EventService};
