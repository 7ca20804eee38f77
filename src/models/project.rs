use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

use crate::database::connection::DbPool;

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("Project with ID {id} not found")]
    NotFound { id: Uuid },
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("No fields provided for update")]
    NoUpdateFields,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateProject {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl Project {
    pub async fn create(pool: &DbPool, project: CreateProject) -> Result<Self, ProjectError> {
        let now = Utc::now();

        let project = sqlx::query_as::<_, Project>(
            "INSERT INTO projects (id, title, description, image_url, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(project.title)
        .bind(project.description)
        .bind(project.image_url)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    pub async fn find_by_id(pool: &DbPool, id: Uuid) -> Result<Option<Self>, ProjectError> {
        let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(project)
    }

    pub async fn find_all(pool: &DbPool) -> Result<Vec<Self>, ProjectError> {
        let projects =
            sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY created_at DESC")
                .fetch_all(pool)
                .await?;

        Ok(projects)
    }

    pub async fn update(
        pool: &DbPool,
        id: Uuid,
        update_data: UpdateProject,
    ) -> Result<Option<Self>, ProjectError> {
        if update_data.title.is_none()
            && update_data.description.is_none()
            && update_data.image_url.is_none()
        {
            return Err(ProjectError::NoUpdateFields);
        }

        let existing = match Self::find_by_id(pool, id).await? {
            Some(project) => project,
            None => return Err(ProjectError::NotFound { id }),
        };

        let now = Utc::now();

        let updated_project = sqlx::query_as::<_, Project>(
            "UPDATE projects
             SET title = $2, description = $3, image_url = $4, updated_at = $5
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(update_data.title.unwrap_or(existing.title))
        .bind(update_data.description.or(existing.description))
        .bind(update_data.image_url.or(existing.image_url))
        .bind(now)
        .fetch_optional(pool)
        .await?;

        Ok(updated_project)
    }

    pub async fn delete(pool: &DbPool, id: Uuid) -> Result<(), ProjectError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ProjectError::NotFound { id });
        }

        Ok(())
    }
}
