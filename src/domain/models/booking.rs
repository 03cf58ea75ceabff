use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_CONFIRMED: &str = "CONFIRMED";
pub const STATUS_CANCELED: &str = "CANCELED";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub event_type_id: String,
    /// Opaque external identifier, assigned at creation and never changed.
    pub booking_uid: String,
    pub booker_name: String,
    pub booker_email: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub event_type_id: String,
    pub start: DateTime<Utc>,
    pub duration_minutes: i32,
    pub name: String,
    pub email: String,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        let end_at = params.start + chrono::Duration::minutes(params.duration_minutes as i64);

        Self {
            id: Uuid::new_v4().to_string(),
            event_type_id: params.event_type_id,
            booking_uid: Uuid::new_v4().to_string(),
            booker_name: params.name,
            booker_email: params.email,
            start_at: params.start,
            end_at,
            status: STATUS_CONFIRMED.to_string(),
            created_at: Utc::now(),
        }
    }
}
