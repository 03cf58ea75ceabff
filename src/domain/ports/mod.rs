use crate::domain::models::{
    availability::{Availability, AvailabilityRule},
    booking::Booking,
    event_type::EventType,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait EventTypeRepository: Send + Sync {
    async fn create(&self, event_type: &EventType) -> Result<EventType, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<EventType>, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<EventType>, AppError>;
    async fn list(&self) -> Result<Vec<EventType>, AppError>;
    async fn update(&self, event_type: &EventType) -> Result<EventType, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    async fn find_default(&self) -> Result<Option<Availability>, AppError>;
    async fn get_or_create_default(&self, default_timezone: &str) -> Result<Availability, AppError>;
    async fn rules_for(&self, availability_id: &str) -> Result<Vec<AvailabilityRule>, AppError>;
    /// Transactionally deletes every existing rule of the availability and
    /// inserts the new set. Never merges.
    async fn replace_rules(
        &self,
        availability_id: &str,
        timezone: &str,
        rules: &[AvailabilityRule],
    ) -> Result<Availability, AppError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingListFilter {
    Upcoming,
    Past,
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Atomic insert of a CONFIRMED booking. A concurrent booking that already
    /// committed for the same (event_type, start_at) makes this fail with
    /// `AppError::SlotTaken` via the storage-level uniqueness constraint.
    async fn create_confirmed(&self, booking: &Booking) -> Result<Booking, AppError>;
    /// Start instants of CONFIRMED bookings with start_at in [from, to).
    async fn confirmed_starts_between(
        &self,
        event_type_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn find_by_uid(&self, uid: &str) -> Result<Option<Booking>, AppError>;
    async fn list(&self, filter: BookingListFilter, now: DateTime<Utc>) -> Result<Vec<Booking>, AppError>;
    /// Idempotent: canceling an already-canceled booking is a no-op success.
    async fn cancel(&self, id: &str) -> Result<Booking, AppError>;
}
