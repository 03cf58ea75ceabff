use chrono::{DateTime, NaiveTime, Utc};
use serde::Serialize;

use crate::domain::models::availability::{Availability, AvailabilityRule};
use crate::domain::models::booking::Booking;

#[derive(Serialize)]
pub struct AvailabilityRuleResponse {
    pub id: String,
    pub weekday: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub id: String,
    pub timezone: String,
    pub rules: Vec<AvailabilityRuleResponse>,
    pub created_at: DateTime<Utc>,
}

impl AvailabilityResponse {
    pub fn from_parts(availability: Availability, rules: Vec<AvailabilityRule>) -> Self {
        Self {
            id: availability.id,
            timezone: availability.timezone,
            rules: rules
                .into_iter()
                .map(|r| AvailabilityRuleResponse {
                    id: r.id,
                    weekday: r.weekday,
                    start_time: r.start_time,
                    end_time: r.end_time,
                })
                .collect(),
            created_at: availability.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub booking_uid: String,
    pub event_type: String,
    pub event_type_slug: String,
    pub booker_name: String,
    pub booker_email: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl BookingResponse {
    pub fn from_booking(booking: Booking, event_type_slug: String) -> Self {
        Self {
            id: booking.id,
            booking_uid: booking.booking_uid,
            event_type: booking.event_type_id,
            event_type_slug,
            booker_name: booking.booker_name,
            booker_email: booking.booker_email,
            start_at: booking.start_at,
            end_at: booking.end_at,
            status: booking.status,
            created_at: booking.created_at,
        }
    }
}
