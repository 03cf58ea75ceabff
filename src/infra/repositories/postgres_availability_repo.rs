use crate::domain::{
    models::availability::{Availability, AvailabilityRule},
    ports::AvailabilityRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresAvailabilityRepo {
    pool: PgPool,
}

impl PostgresAvailabilityRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityRepository for PostgresAvailabilityRepo {
    async fn find_default(&self) -> Result<Option<Availability>, AppError> {
        sqlx::query_as::<_, Availability>("SELECT * FROM availabilities ORDER BY created_at ASC LIMIT 1").fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn get_or_create_default(&self, default_timezone: &str) -> Result<Availability, AppError> {
        if let Some(existing) = self.find_default().await? {
            return Ok(existing);
        }
        let fresh = Availability::new(default_timezone.to_string());
        sqlx::query_as::<_, Availability>(
            "INSERT INTO availabilities (id, timezone, created_at) VALUES ($1, $2, $3) RETURNING *"
        )
            .bind(&fresh.id).bind(&fresh.timezone).bind(fresh.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn rules_for(&self, availability_id: &str) -> Result<Vec<AvailabilityRule>, AppError> {
        sqlx::query_as::<_, AvailabilityRule>(
            "SELECT * FROM availability_rules WHERE availability_id = $1 ORDER BY weekday, start_time"
        )
            .bind(availability_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn replace_rules(
        &self,
        availability_id: &str,
        timezone: &str,
        rules: &[AvailabilityRule],
    ) -> Result<Availability, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let updated = sqlx::query_as::<_, Availability>(
            "UPDATE availabilities SET timezone = $1 WHERE id = $2 RETURNING *"
        )
            .bind(timezone).bind(availability_id)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM availability_rules WHERE availability_id = $1")
            .bind(availability_id)
            .execute(&mut *tx).await.map_err(AppError::Database)?;

        for rule in rules {
            sqlx::query(
                "INSERT INTO availability_rules (id, availability_id, weekday, start_time, end_time) VALUES ($1, $2, $3, $4, $5)"
            )
                .bind(&rule.id).bind(&rule.availability_id).bind(rule.weekday).bind(rule.start_time).bind(rule.end_time)
                .execute(&mut *tx).await.map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }
}
