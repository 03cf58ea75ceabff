mod common;

use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use common::{parse_body, TestApp};
use serde_json::json;

use slotbook::domain::models::booking::{Booking, NewBookingParams};
use slotbook::domain::models::event_type::EventType;
use slotbook::domain::ports::{BookingRepository, EventTypeRepository};
use slotbook::error::AppError;

#[tokio::test]
async fn test_only_one_concurrent_insert_wins_the_slot() {
    let app = TestApp::new().await;

    let event_type = app
        .state
        .event_type_repo
        .create(&EventType::new(
            "race-30".to_string(),
            "Race".to_string(),
            String::new(),
            30,
            true,
        ))
        .await
        .unwrap();

    let start = Utc.with_ymd_and_hms(2030, 1, 7, 4, 30, 0).unwrap();

    let mut handles = Vec::new();
    for i in 0..5 {
        let repo = app.state.booking_repo.clone();
        let event_type_id = event_type.id.clone();
        handles.push(tokio::spawn(async move {
            let booking = Booking::new(NewBookingParams {
                event_type_id,
                start,
                duration_minutes: 30,
                name: format!("racer-{}", i),
                email: format!("racer-{}@example.com", i),
            });
            repo.create_confirmed(&booking).await
        }));
    }

    let mut confirmed = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => confirmed += 1,
            Err(AppError::SlotTaken) => rejected += 1,
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    assert_eq!(confirmed, 1);
    assert_eq!(rejected, 4);

    let stored = app
        .state
        .booking_repo
        .confirmed_starts_between(
            &event_type.id,
            start - chrono::Duration::hours(1),
            start + chrono::Duration::hours(1),
        )
        .await
        .unwrap();
    assert_eq!(stored, vec![start]);
}

#[tokio::test]
async fn test_concurrent_http_requests_yield_one_created_one_conflict() {
    let app = TestApp::new().await;
    app.create_event_type("race-30", 30).await;
    app.put_availability(
        "Asia/Kolkata",
        json!([{"weekday": 0, "start_time": "09:00", "end_time": "17:00"}]),
    )
    .await;

    let payload = json!({
        "slug": "race-30",
        "start_at": "2030-01-07T10:00:00",
        "name": "Asha",
        "email": "asha@example.com"
    });

    let (first, second) = tokio::join!(
        app.request("POST", "/api/public/bookings", Some(payload.clone())),
        app.request("POST", "/api/public/bookings", Some(payload.clone()))
    );

    let mut statuses = [first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);

    let res = app.request("GET", "/api/public/slots?slug=race-30&date=2030-01-07", None).await;
    let slots = parse_body(res).await;
    assert!(!slots
        .as_array()
        .unwrap()
        .iter()
        .any(|s| s.as_str() == Some("2030-01-07T10:00:00+05:30")));
}
