use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateEventTypeRequest, UpdateEventTypeRequest};
use crate::domain::models::event_type::EventType;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_event_type(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateEventTypeRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.slug.trim().is_empty() {
        return Err(AppError::Validation("slug must not be empty".into()));
    }
    if payload.duration_minutes <= 0 {
        return Err(AppError::Validation("duration_minutes must be positive".into()));
    }

    let event_type = EventType::new(
        payload.slug,
        payload.title,
        payload.description.unwrap_or_default(),
        payload.duration_minutes,
        payload.active.unwrap_or(true),
    );

    let created = state.event_type_repo.create(&event_type).await?;
    info!("Event type created: {}", created.slug);
    Ok(Json(created))
}

pub async fn list_event_types(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let event_types = state.event_type_repo.list().await?;
    Ok(Json(event_types))
}

pub async fn get_event_type(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event_type = state.event_type_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Event type not found".into()))?;
    Ok(Json(event_type))
}

pub async fn update_event_type(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEventTypeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event_type = state.event_type_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Event type not found".into()))?;

    if let Some(val) = payload.slug {
        if val.trim().is_empty() {
            return Err(AppError::Validation("slug must not be empty".into()));
        }
        event_type.slug = val;
    }
    if let Some(val) = payload.title { event_type.title = val; }
    if let Some(val) = payload.description { event_type.description = val; }
    if let Some(val) = payload.duration_minutes {
        if val <= 0 {
            return Err(AppError::Validation("duration_minutes must be positive".into()));
        }
        event_type.duration_minutes = val;
    }
    if let Some(val) = payload.active { event_type.active = val; }

    let updated = state.event_type_repo.update(&event_type).await?;
    info!("Event type updated: {}", updated.slug);
    Ok(Json(updated))
}

pub async fn delete_event_type(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.event_type_repo.delete(&id).await?;
    info!("Event type deleted: {}", id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

/// Public lookup by slug; inactive event types are indistinguishable from
/// missing ones.
pub async fn public_get_event_type(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event_type = state.event_type_repo.find_by_slug(&slug).await?
        .filter(|et| et.active)
        .ok_or(AppError::NotFound("Event type not found".into()))?;
    Ok(Json(event_type))
}

/// GET /api/public/slots?slug=demo-15&date=2026-01-16
/// Returns local-time RFC 3339 instants, e.g. ["2026-01-16T09:00:00+05:30", ...]
pub async fn public_get_slots(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let slug = params.get("slug").ok_or(AppError::Validation("slug and date required".into()))?;
    let date_str = params.get("date").ok_or(AppError::Validation("slug and date required".into()))?;

    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;

    let slots = state.booking_service.slots_for(slug, date, Utc::now()).await?;
    Ok(Json(slots))
}
