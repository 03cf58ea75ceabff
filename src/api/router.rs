use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

use crate::api::handlers::{availability, booking, event_type, health};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Admin: event type catalog
        .route("/api/event-types", get(event_type::list_event_types).post(event_type::create_event_type))
        .route("/api/event-types/{id}", get(event_type::get_event_type).put(event_type::update_event_type).delete(event_type::delete_event_type))

        // Admin: the single global schedule
        .route("/api/availability", get(availability::get_availability).put(availability::replace_availability))

        // Admin: booking ledger
        .route("/api/bookings", get(booking::list_bookings))
        .route("/api/bookings/{booking_id}", get(booking::get_booking))
        .route("/api/bookings/{booking_id}/cancel", post(booking::cancel_booking))

        // Public booking flow
        .route("/api/public/event-types/{slug}", get(event_type::public_get_event_type))
        .route("/api/public/slots", get(event_type::public_get_slots))
        .route("/api/public/bookings", post(booking::public_create_booking))
        .route("/api/public/bookings/{uid}", get(booking::public_get_booking))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
