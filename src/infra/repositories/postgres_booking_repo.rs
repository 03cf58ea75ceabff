use crate::domain::models::booking::{Booking, STATUS_CANCELED, STATUS_CONFIRMED};
use crate::domain::ports::{BookingListFilter, BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create_confirmed(&self, booking: &Booking) -> Result<Booking, AppError> {
        // The partial unique index on (event_type_id, start_at) WHERE
        // status = 'CONFIRMED' rejects the losing side of a race here.
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, event_type_id, booking_uid, booker_name, booker_email, start_at, end_at, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
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
            "SELECT start_at FROM bookings WHERE event_type_id = $1 AND status = $2 AND start_at >= $3 AND start_at < $4"
        )
            .bind(event_type_id).bind(STATUS_CONFIRMED).bind(from).bind(to)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_uid(&self, uid: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE booking_uid = $1").bind(uid).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self, filter: BookingListFilter, now: DateTime<Utc>) -> Result<Vec<Booking>, AppError> {
        let sql = match filter {
            BookingListFilter::Upcoming => "SELECT * FROM bookings WHERE end_at >= $1 ORDER BY start_at DESC",
            BookingListFilter::Past => "SELECT * FROM bookings WHERE end_at < $1 ORDER BY start_at DESC",
        };
        sqlx::query_as::<_, Booking>(sql).bind(now).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn cancel(&self, id: &str) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET status = $1 WHERE id = $2 RETURNING *")
            .bind(STATUS_CANCELED).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Booking not found".into()))
    }
}
