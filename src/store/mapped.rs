use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Event, EventChanges, NewEvent};
use crate::store::{EventStore, UpdateOutcome};
use crate::utils::error::AppError;

const EVENT_COLUMNS: &str = "id, title, description, event_date, location, created_at";

/// Backend built on sqlx's typed row mapping: every query comes back as an
/// [`Event`] via `query_as`, and writes use `RETURNING` to hand the full
/// record straight back.
pub struct MappedStore {
    pool: PgPool,
}

impl MappedStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for MappedStore {
    async fn create(&self, new_event: NewEvent) -> Result<Event, AppError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "INSERT INTO events (title, description, event_date, location) \
             VALUES ($1, $2, $3, $4) RETURNING {EVENT_COLUMNS}"
        ))
        .bind(&new_event.title)
        .bind(&new_event.description)
        .bind(new_event.event_date)
        .bind(&new_event.location)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    async fn list(&self) -> Result<Vec<Event>, AppError> {
        let events = sqlx::query_as::<_, Event>(&format!("SELECT {EVENT_COLUMNS} FROM events"))
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }

    async fn get(&self, id: i32) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound)
    }

    async fn update(&self, id: i32, changes: EventChanges) -> Result<UpdateOutcome, AppError> {
        let existing = self.get(id).await?;

        let merged = changes.apply(&existing);
        if merged == existing {
            return Ok(UpdateOutcome::Unchanged(existing));
        }

        let updated = sqlx::query_as::<_, Event>(&format!(
            "UPDATE events SET title = $1, description = $2, event_date = $3, location = $4 \
             WHERE id = $5 RETURNING {EVENT_COLUMNS}"
        ))
        .bind(&merged.title)
        .bind(&merged.description)
        .bind(merged.event_date)
        .bind(&merged.location)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound)?;

        Ok(UpdateOutcome::Updated(updated))
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
