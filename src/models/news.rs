use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

use crate::database::connection::DbPool;

#[derive(Error, Debug)]
pub enum NewsError {
    #[error("Article with ID {id} not found")]
    NotFound { id: Uuid },
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("No fields provided for update")]
    NoUpdateFields,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NewsArticle {
    pub id: Uuid,
    pub title: String,
    pub body: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateNewsArticle {
    pub title: String,
    pub body: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateNewsArticle {
    pub title: Option<String>,
    pub body: Option<String>,
    pub image_url: Option<String>,
}

impl NewsArticle {
    pub async fn create(pool: &DbPool, article: CreateNewsArticle) -> Result<Self, NewsError> {
        let now = Utc::now();

        let article = sqlx::query_as::<_, NewsArticle>(
            "INSERT INTO news_articles (id, title, body, image_url, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(article.title)
        .bind(article.body)
        .bind(article.image_url)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(article)
    }

    pub async fn find_by_id(pool: &DbPool, id: Uuid) -> Result<Option<Self>, NewsError> {
        let article = sqlx::query_as::<_, NewsArticle>("SELECT * FROM news_articles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(article)
    }

    pub async fn find_all(pool: &DbPool) -> Result<Vec<Self>, NewsError> {
        let articles =
            sqlx::query_as::<_, NewsArticle>("SELECT * FROM news_articles ORDER BY created_at DESC")
                .fetch_all(pool)
                .await?;

        Ok(articles)
    }

    pub async fn update(
        pool: &DbPool,
        id: Uuid,
        update_data: UpdateNewsArticle,
    ) -> Result<Option<Self>, NewsError> {
        if update_data.title.is_none()
            && update_data.body.is_none()
            && update_data.image_url.is_none()
        {
            return Err(NewsError::NoUpdateFields);
        }

        let existing = match Self::find_by_id(pool, id).await? {
            Some(article) => article,
            None => return Err(NewsError::NotFound { id }),
        };

        let now = Utc::now();

        let updated_article = sqlx::query_as::<_, NewsArticle>(
            "UPDATE news_articles
             SET title = $2, body = $3, image_url = $4, updated_at = $5
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(update_data.title.unwrap_or(existing.title))
        .bind(update_data.body.or(existing.body))
        .bind(update_data.image_url.or(existing.image_url))
        .bind(now)
        .fetch_optional(pool)
        .await?;

        Ok(updated_article)
    }

    pub async fn delete(pool: &DbPool, id: Uuid) -> Result<(), NewsError> {
        let result = sqlx::query("DELETE FROM news_articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(NewsError::NotFound { id });
        }

        Ok(())
    }
}
