//! REST endpoints for events, mounted under `/api/events`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};

use crate::models::EventModel;
use crate::services::EventService;
use crate::store::EventStore;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};

pub fn router<S: EventStore + 'static>(service: EventService<S>) -> Router {
    Router::new()
        .route("/", get(get_all_events::<S>).post(create_event::<S>))
        .route(
            "/:id",
            get(get_event::<S>)
                .put(update_event::<S>)
                .delete(delete_event::<S>),
        )
        .with_state(service)
}

async fn create_event<S: EventStore>(
    State(service): State<EventService<S>>,
    payload: Result<Json<EventModel>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(model) = payload?;
    let event = service.create_event(model).await?;
    Ok(created(event, "Event Created Succesfully"))
}

async fn get_event<S: EventStore>(
    State(service): State<EventService<S>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    let event = service.get_event(id).await?;
    Ok(success(event, "Event Fetched Succesfully"))
}

async fn get_all_events<S: EventStore>(
    State(service): State<EventService<S>>,
) -> Result<Response, AppError> {
    let events = service.get_all_events().await?;
    Ok(success(events, "All Events Fetched Succesfully"))
}

async fn update_event<S: EventStore>(
    State(service): State<EventService<S>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EventModel>, JsonRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    let Json(model) = payload?;
    let event = service.update_event(id, model).await?;
    Ok(success(event, "Event updated Succesfully"))
}

async fn delete_event<S: EventStore>(
    State(service): State<EventService<S>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    let message = service.delete_event(id).await?;
    Ok(success(message, "Event deleted Succesfully"))
}
