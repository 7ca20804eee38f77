use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

use crate::database::connection::DbPool;

#[derive(Error, Debug)]
pub enum EventError {
    #[error("Event with ID {id} not found")]
    NotFound { id: Uuid },
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("No fields provided for update")]
    NoUpdateFields,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub event_date: DateTime<Utc>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub event_date: DateTime<Utc>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
}

impl Event {
    pub async fn create(pool: &DbPool, event: CreateEvent) -> Result<Self, EventError> {
        let now = Utc::now();

        let event = sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, title, description, location, event_date, image_url, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(event.title)
        .bind(event.description)
        .bind(event.location)
        .bind(event.event_date)
        .bind(event.image_url)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(event)
    }

    pub async fn find_by_id(pool: &DbPool, id: Uuid) -> Result<Option<Self>, EventError> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(event)
    }

    pub async fn find_all(pool: &DbPool) -> Result<Vec<Self>, EventError> {
        let events = sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY event_date DESC")
            .fetch_all(pool)
            .await?;

        Ok(events)
    }

    pub async fn update(
        pool: &DbPool,
        id: Uuid,
        update_data: UpdateEvent,
    ) -> Result<Option<Self>, EventError> {
        if update_data.title.is_none()
            && update_data.description.is_none()
            && update_data.location.is_none()
            && update_data.event_date.is_none()
            && update_data.image_url.is_none()
        {
            return Err(EventError::NoUpdateFields);
        }

        let existing = match Self::find_by_id(pool, id).await? {
            Some(event) => event,
            None => return Err(EventError::NotFound { id }),
        };

        let now = Utc::now();

        let updated_event = sqlx::query_as::<_, Event>(
            "UPDATE events
             SET title = $2, description = $3, location = $4, event_date = $5, image_url = $6, updated_at = $7
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(update_data.title.unwrap_or(existing.title))
        .bind(update_data.description.or(existing.description))
        .bind(update_data.location.or(existing.location))
        .bind(update_data.event_date.unwrap_or(existing.event_date))
        .bind(update_data.image_url.or(existing.image_url))
        .bind(now)
        .fetch_optional(pool)
        .await?;

        Ok(updated_event)
    }

    pub async fn delete(pool: &DbPool, id: Uuid) -> Result<(), EventError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(EventError::NotFound { id });
        }

        Ok(())
    }
}
