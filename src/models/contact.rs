use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::connection::DbPool;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Contact {
    pub async fn create(pool: &DbPool, contact: CreateContact) -> Result<Self, sqlx::Error> {
        let contact = sqlx::query_as::<_, Contact>(
            "INSERT INTO contacts (id, name, email, message, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(contact.name)
        .bind(contact.email)
        .bind(contact.message)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(contact)
    }

    pub async fn find_all(pool: &DbPool) -> Result<Vec<Self>, sqlx::Error> {
        let contacts =
            sqlx::query_as::<_, Contact>("SELECT * FROM contacts ORDER BY created_at DESC")
                .fetch_all(pool)
                .await?;

        Ok(contacts)
    }
}
