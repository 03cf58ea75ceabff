use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateEventTypeRequest {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub active: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateEventTypeRequest {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub active: Option<bool>,
}

#[derive(Deserialize)]
pub struct AvailabilityRuleRequest {
    pub weekday: i32,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Deserialize)]
pub struct ReplaceAvailabilityRequest {
    pub timezone: String,
    pub rules: Vec<AvailabilityRuleRequest>,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub slug: Option<String>,
    #[serde(alias = "startAt")]
    pub start_at: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}
