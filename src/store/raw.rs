use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::models::{Event, EventChanges, NewEvent};
use crate::store::{EventStore, UpdateOutcome};
use crate::utils::error::AppError;

/// Backend built on hand-written SQL: manual column extraction, an explicit
/// EXISTS check before delete, and transactions around multi-statement
/// flows so a failure reverts the whole call.
pub struct RawStore {
    pool: PgPool,
}

impl RawStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn event_from_row(row: &PgRow) -> Result<Event, sqlx::Error> {
    Ok(Event {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        event_date: row.try_get("event_date")?,
        location: row.try_get("location")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl EventStore for RawStore {
    async fn create(&self, new_event: NewEvent) -> Result<Event, AppError> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            "INSERT INTO events (title, description, event_date, location) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&new_event.title)
        .bind(&new_event.description)
        .bind(new_event.event_date)
        .bind(&new_event.location)
        .fetch_one(&mut *tx)
        .await?;

        // Read the row back so the caller sees the server-assigned
        // created_at, not a client-side guess.
        let row = sqlx::query(
            "SELECT id, title, description, event_date, location, created_at \
             FROM events WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        let event = event_from_row(&row)?;

        tx.commit().await?;
        Ok(event)
    }

    async fn list(&self) -> Result<Vec<Event>, AppError> {
        let rows = sqlx::query(
            "SELECT id, title, description, event_date, location, created_at FROM events",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut events = Vec::with_capacity(rows.len());
        for row in &rows {
            events.push(event_from_row(row)?);
        }
        Ok(events)
    }

    async fn get(&self, id: i32) -> Result<Event, AppError> {
        let row = sqlx::query(
            "SELECT id, title, description, event_date, location, created_at \
             FROM events WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(event_from_row(&row)?),
            None => Err(AppError::NotFound),
        }
    }

    async fn update(&self, id: i32, changes: EventChanges) -> Result<UpdateOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            "SELECT id, title, description, event_date, location, created_at \
             FROM events WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let existing = match row {
            Some(row) => event_from_row(&row)?,
            None => return Err(AppError::NotFound),
        };

        // Detect the no-op before touching the row; zero affected rows can
        // then only mean the row vanished underneath us.
        let merged = changes.apply(&existing);
        if merged == existing {
            return Ok(UpdateOutcome::Unchanged(existing));
        }

        let affected = sqlx::query(
            "UPDATE events SET title = $1, description = $2, event_date = $3, location = $4 \
             WHERE id = $5",
        )
        .bind(&merged.title)
        .bind(&merged.description)
        .bind(merged.event_date)
        .bind(&merged.location)
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if affected == 0 {
            return Err(AppError::NotFound);
        }

        tx.commit().await?;
        Ok(UpdateOutcome::Updated(merged))
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM events WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Err(AppError::NotFound);
        }

        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
