use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct EventType {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub duration_minutes: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl EventType {
    pub fn new(slug: String, title: String, description: String, duration_minutes: i32, active: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            slug,
            title,
            description,
            duration_minutes,
            active,
            created_at: Utc::now(),
        }
    }
}
