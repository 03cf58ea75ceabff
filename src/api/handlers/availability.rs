use axum::{extract::State, response::IntoResponse, Json};
use chrono::NaiveTime;
use chrono_tz::Tz;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::ReplaceAvailabilityRequest;
use crate::api::dtos::responses::AvailabilityResponse;
use crate::domain::models::availability::AvailabilityRule;
use crate::error::AppError;
use crate::state::AppState;

pub async fn get_availability(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let availability = state.availability_repo
        .get_or_create_default(&state.config.default_timezone)
        .await?;
    let rules = state.availability_repo.rules_for(&availability.id).await?;

    Ok(Json(AvailabilityResponse::from_parts(availability, rules)))
}

/// Wholesale replacement: the previous rule set is deleted and the new one
/// inserted in a single transaction. There is no partial patch.
pub async fn replace_availability(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ReplaceAvailabilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.timezone.parse::<Tz>().is_err() {
        return Err(AppError::Validation("Invalid timezone".into()));
    }

    let availability = state.availability_repo
        .get_or_create_default(&state.config.default_timezone)
        .await?;

    let mut rules = Vec::with_capacity(payload.rules.len());
    for rule in &payload.rules {
        if !(0..=6).contains(&rule.weekday) {
            return Err(AppError::Validation("weekday must be between 0 (Monday) and 6 (Sunday)".into()));
        }
        let start_time = parse_wall_clock(&rule.start_time)?;
        let end_time = parse_wall_clock(&rule.end_time)?;
        if start_time >= end_time {
            return Err(AppError::Validation("start_time must be before end_time".into()));
        }
        rules.push(AvailabilityRule::new(availability.id.clone(), rule.weekday, start_time, end_time));
    }

    let updated = state.availability_repo
        .replace_rules(&availability.id, &payload.timezone, &rules)
        .await?;

    info!("Availability replaced: {} rules, timezone {}", rules.len(), updated.timezone);
    Ok(Json(AvailabilityResponse::from_parts(updated, rules)))
}

fn parse_wall_clock(raw: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| AppError::Validation("Invalid time format (HH:MM)".into()))
}
