use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::CreateBookingRequest;
use crate::api::dtos::responses::BookingResponse;
use crate::domain::models::booking::Booking;
use crate::domain::ports::BookingListFilter;
use crate::domain::services::booking_service::AdmissionRequest;
use crate::error::AppError;
use crate::state::AppState;

async fn with_slug(state: &AppState, booking: Booking) -> Result<BookingResponse, AppError> {
    let slug = state.event_type_repo.find_by_id(&booking.event_type_id).await?
        .map(|et| et.slug)
        .unwrap_or_default();
    Ok(BookingResponse::from_booking(booking, slug))
}

/// GET /api/bookings?type=upcoming|past (defaults to upcoming)
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter = match params.get("type").map(String::as_str) {
        Some("past") => BookingListFilter::Past,
        _ => BookingListFilter::Upcoming,
    };

    let bookings = state.booking_repo.list(filter, Utc::now()).await?;

    let slugs: HashMap<String, String> = state.event_type_repo.list().await?
        .into_iter()
        .map(|et| (et.id, et.slug))
        .collect();

    let response: Vec<BookingResponse> = bookings
        .into_iter()
        .map(|b| {
            let slug = slugs.get(&b.event_type_id).cloned().unwrap_or_default();
            BookingResponse::from_booking(b, slug)
        })
        .collect();

    Ok(Json(response))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    Ok(Json(with_slug(&state, booking).await?))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let canceled = state.booking_repo.cancel(&booking_id).await?;
    info!("Booking canceled: {}", canceled.booking_uid);
    Ok(Json(with_slug(&state, canceled).await?))
}

/// POST /api/public/bookings
/// { slug, start_at, name, email } — start_at may be offset-qualified or a
/// naive local datetime interpreted in the schedule's timezone.
pub async fn public_create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.booking_service
        .admit(AdmissionRequest {
            slug: payload.slug.unwrap_or_default(),
            start_at: payload.start_at.unwrap_or_default(),
            name: payload.name.unwrap_or_default(),
            email: payload.email.unwrap_or_default(),
        })
        .await?;

    let response = with_slug(&state, created).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn public_get_booking(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_uid(&uid).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    Ok(Json(with_slug(&state, booking).await?))
}
