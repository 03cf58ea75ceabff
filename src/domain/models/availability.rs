use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The single global weekly schedule. Created lazily with the configured
/// default timezone on first access.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Availability {
    pub id: String,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
}

impl Availability {
    pub fn new(timezone: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timezone,
            created_at: Utc::now(),
        }
    }
}

/// One bookable window on one weekday (0 = Monday .. 6 = Sunday), local
/// wall-clock. Rules are owned by exactly one availability and replaced as a
/// full set on every update.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AvailabilityRule {
    pub id: String,
    pub availability_id: String,
    pub weekday: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl AvailabilityRule {
    pub fn new(availability_id: String, weekday: i32, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            availability_id,
            weekday,
            start_time,
            end_time,
        }
    }
}
