use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::info;

use crate::domain::models::booking::{Booking, NewBookingParams};
use crate::domain::models::event_type::EventType;
use crate::domain::ports::{AvailabilityRepository, BookingRepository, EventTypeRepository};
use crate::domain::services::slots::{calculate_slots, day_bounds_utc};
use crate::error::AppError;

pub struct AdmissionRequest {
    pub slug: String,
    pub start_at: String,
    pub name: String,
    pub email: String,
}

/// Orchestrates slot listing and booking admission: validate the event type,
/// resolve the schedule, and commit against the ledger. Stateless; safe to
/// call from any number of concurrent requests, the uniqueness constraint in
/// storage is the only double-booking defense.
pub struct BookingService {
    event_type_repo: Arc<dyn EventTypeRepository>,
    availability_repo: Arc<dyn AvailabilityRepository>,
    booking_repo: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(
        event_type_repo: Arc<dyn EventTypeRepository>,
        availability_repo: Arc<dyn AvailabilityRepository>,
        booking_repo: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            event_type_repo,
            availability_repo,
            booking_repo,
        }
    }

    async fn active_event_type(&self, slug: &str) -> Result<EventType, AppError> {
        self.event_type_repo
            .find_by_slug(slug)
            .await?
            .filter(|et| et.active)
            .ok_or(AppError::NotFound("Event type not found".into()))
    }

    /// Bookable start instants for one event type on one calendar date, as
    /// local RFC 3339 datetimes. No schedule configured means no slots, not
    /// an error.
    pub async fn slots_for(
        &self,
        slug: &str,
        date: NaiveDate,
        now_utc: DateTime<Utc>,
    ) -> Result<Vec<String>, AppError> {
        let event_type = self.active_event_type(slug).await?;

        let Some(availability) = self.availability_repo.find_default().await? else {
            return Ok(Vec::new());
        };
        let rules = self.availability_repo.rules_for(&availability.id).await?;

        let tz: Tz = availability.timezone.parse().unwrap_or(chrono_tz::UTC);
        let Some((day_start_utc, day_end_utc)) = day_bounds_utc(tz, date) else {
            return Ok(Vec::new());
        };

        let booked: HashSet<DateTime<Utc>> = self
            .booking_repo
            .confirmed_starts_between(&event_type.id, day_start_utc, day_end_utc)
            .await?
            .into_iter()
            .collect();

        Ok(calculate_slots(&event_type, &availability, &rules, date, &booked, now_utc))
    }

    /// Admits a booking request: VALIDATING -> CHECKING_SLOT -> COMMITTING.
    ///
    /// The requested start is taken as given (offset-qualified, or naive
    /// local interpreted in the schedule timezone); there is deliberately no
    /// re-check that it falls inside a configured window. The commit either
    /// returns the CONFIRMED booking or fails with `SlotTaken` when a
    /// concurrent request won the slot.
    pub async fn admit(&self, req: AdmissionRequest) -> Result<Booking, AppError> {
        if req.slug.trim().is_empty()
            || req.start_at.trim().is_empty()
            || req.name.trim().is_empty()
            || req.email.trim().is_empty()
        {
            return Err(AppError::Validation("slug, start_at, name and email are required".into()));
        }

        let event_type = self.active_event_type(&req.slug).await?;

        let availability = self
            .availability_repo
            .find_default()
            .await?
            .ok_or(AppError::Configuration("availability not set".into()))?;

        let tz: Tz = availability.timezone.parse().unwrap_or(chrono_tz::UTC);
        let start_utc = parse_start_instant(&req.start_at, tz)?;

        let booking = Booking::new(NewBookingParams {
            event_type_id: event_type.id.clone(),
            start: start_utc,
            duration_minutes: event_type.duration_minutes,
            name: req.name,
            email: req.email,
        });

        let created = self.booking_repo.create_confirmed(&booking).await?;
        info!("Booking confirmed: {} for event type {}", created.booking_uid, event_type.slug);
        Ok(created)
    }
}

/// Accepts an offset-qualified RFC 3339 instant, or a naive local datetime
/// which is interpreted in the schedule's timezone.
fn parse_start_instant(raw: &str, tz: Tz) -> Result<DateTime<Utc>, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|_| AppError::Validation("start_at must be an ISO 8601 datetime".into()))?;

    tz.from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or(AppError::Validation("start_at is ambiguous or skipped due to DST".into()))
}
