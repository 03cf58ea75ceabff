use slotbook::{
    api::router::create_router,
    config::Config,
    domain::services::booking_service::BookingService,
    infra::repositories::{
        sqlite_availability_repo::SqliteAvailabilityRepo,
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_event_type_repo::SqliteEventTypeRepo,
    },
    state::AppState,
};

use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            default_timezone: "Asia/Kolkata".to_string(),
        };

        let event_type_repo = Arc::new(SqliteEventTypeRepo::new(pool.clone()));
        let availability_repo = Arc::new(SqliteAvailabilityRepo::new(pool.clone()));
        let booking_repo = Arc::new(SqliteBookingRepo::new(pool.clone()));
        let booking_service = Arc::new(BookingService::new(
            event_type_repo.clone(),
            availability_repo.clone(),
            booking_repo.clone(),
        ));

        let state = Arc::new(AppState {
            config,
            event_type_repo,
            availability_repo,
            booking_repo,
            booking_service,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(payload) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(payload.to_string())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    #[allow(dead_code)]
    pub async fn create_event_type(&self, slug: &str, duration_minutes: i32) -> Value {
        let response = self
            .request(
                "POST",
                "/api/event-types",
                Some(json!({
                    "slug": slug,
                    "title": format!("{} meeting", slug),
                    "duration_minutes": duration_minutes
                })),
            )
            .await;
        assert!(response.status().is_success(), "create_event_type failed: {}", response.status());
        parse_body(response).await
    }

    #[allow(dead_code)]
    pub async fn put_availability(&self, timezone: &str, rules: Value) -> Value {
        let response = self
            .request(
                "PUT",
                "/api/availability",
                Some(json!({ "timezone": timezone, "rules": rules })),
            )
            .await;
        assert!(response.status().is_success(), "put_availability failed: {}", response.status());
        parse_body(response).await
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
