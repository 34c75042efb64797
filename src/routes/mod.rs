use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer, Config};
use crate::handlers::{events, health_check};
use crate::services::EventService;
use crate::store::EventStore;

pub const EVENTS_BASE_PATH: &str = "/api/events";

pub fn create_routes<S: EventStore + 'static>(service: EventService<S>, config: &Config) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest(EVENTS_BASE_PATH, events::router(service))
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer(config.production))
        .layer(create_cors_layer(&config.cors_allowed_origins))
}
