use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::connection::DbPool;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Volunteer {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateVolunteer {
    pub fullname: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
}

impl Volunteer {
    pub async fn create(pool: &DbPool, volunteer: CreateVolunteer) -> Result<Self, sqlx::Error> {
        let volunteer = sqlx::query_as::<_, Volunteer>(
            "INSERT INTO volunteers (id, fullname, email, phone, message, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(volunteer.fullname)
        .bind(volunteer.email)
        .bind(volunteer.phone)
        .bind(volunteer.message)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(volunteer)
    }

    pub async fn find_all(pool: &DbPool) -> Result<Vec<Self>, sqlx::Error> {
        let volunteers =
            sqlx::query_as::<_, Volunteer>("SELECT * FROM volunteers ORDER BY created_at DESC")
                .fetch_all(pool)
                .await?;

        Ok(volunteers)
    }
}
