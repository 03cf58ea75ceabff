use crate::domain::models::booking::{Booking, STATUS_CANCELED, STATUS_CONFIRMED};
use crate::domain::ports::{BookingListFilter, BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create_confirmed(&self, booking: &Booking) -> Result<Booking, AppError> {
        // The partial unique index on (event_type_id, start_at) WHERE
        // status = 'CONFIRMED' rejects the losing side of a race here.
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, event_type_id, booking_uid, booker_name, booker_email, start_at, end_at, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.event_type_id).bind(&booking.booking_uid)
            .bind(&booking.booker_name).bind(&booking.booker_email)
            .bind(booking.start_at).bind(booking.end_at).bind(&booking.status).bind(booking.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::from_booking_insert)
    }
    async fn confirmed_starts_between(
        &self,
        event_type_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, AppError> {
        sqlx::query_scalar::<_, DateTime<Utc>>(
            "SELECT start_at FROM bookings WHERE event_type_id = ? AND status = ? AND start_at >= ? AND start_at < ?"
        )
            .bind(event_type_id).bind(STATUS_CONFIRMED).bind(from).bind(to)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_uid(&self, uid: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE booking_uid = ?").bind(uid).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self, filter: BookingListFilter, now: DateTime<Utc>) -> Result<Vec<Booking>, AppError> {
        let sql = match filter {
            BookingListFilter::Upcoming => "SELECT * FROM bookings WHERE end_at >= ? ORDER BY start_at DESC",
            BookingListFilter::Past => "SELECT * FROM bookings WHERE end_at < ? ORDER BY start_at DESC",
        };
        sqlx::query_as::<_, Booking>(sql).bind(now).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn cancel(&self, id: &str) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET status = ? WHERE id = ? RETURNING *")
            .bind(STATUS_CANCELED).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Booking not found".into()))
    }
}
