use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

use crate::database::connection::DbPool;

#[derive(Error, Debug)]
pub enum SubscriberError {
    #[error("Email address already subscribed")]
    AlreadySubscribed,
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for SubscriberError {
    fn from(e: sqlx::Error) -> Self {
        if e.as_database_error()
            .is_some_and(|db| db.is_unique_violation())
        {
            SubscriberError::AlreadySubscribed
        } else {
            SubscriberError::Database(e)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subscriber {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Subscriber {
    pub async fn create(pool: &DbPool, email: String) -> Result<Self, SubscriberError> {
        let subscriber = sqlx::query_as::<_, Subscriber>(
            "INSERT INTO subscribers (id, email, created_at)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(subscriber)
    }

    pub async fn find_all(pool: &DbPool) -> Result<Vec<Self>, sqlx::Error> {
        let subscribers =
            sqlx::query_as::<_, Subscriber>("SELECT * FROM subscribers ORDER BY created_at DESC")
                .fetch_all(pool)
                .await?;

        Ok(subscribers)
    }
}
