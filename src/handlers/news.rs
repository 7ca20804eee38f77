use actix_web::{web, HttpResponse, Result};
use tracing::{error, info};
use uuid::Uuid;

use crate::database::connection::DbPool;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::news::{CreateNewsArticle, NewsArticle, NewsError, UpdateNewsArticle};
use crate::requests::news::{CreateNewsRequest, UpdateNewsRequest};
use crate::utils::helpers::ApiResponse;

pub async fn create(
    pool: web::Data<DbPool>,
    request: web::Json<CreateNewsRequest>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    info!("Creating news article for user: {}", user.user_id);

    let create_article = CreateNewsArticle {
        title: request.title.clone(),
        body: request.body.clone(),
        image_url: request.image_url.clone(),
    };

    match NewsArticle::create(&pool, create_article).await {
        Ok(article) => {
            info!("Successfully created article with ID: {}", article.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(article)))
        }
        Err(NewsError::Database(e)) => {
            error!("Database error creating article: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                    "Failed to create article".to_string(),
                )),
            )
        }
        Err(e) => {
            error!("Error creating article: {}", e);
            Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(e.to_string())))
        }
    }
}

pub async fn get_article(pool: web::Data<DbPool>, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let article_id = path.into_inner();

    match NewsArticle::find_by_id(&pool, article_id).await {
        Ok(Some(article)) => Ok(HttpResponse::Ok().json(ApiResponse::success(article))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error(
            "Article not found".to_string(),
        ))),
        Err(NewsError::Database(e)) => {
            error!("Database error getting article: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                    "Failed to retrieve article".to_string(),
                )),
            )
        }
        Err(e) => {
            error!("Error getting article: {}", e);
            Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(e.to_string())))
        }
    }
}

pub async fn all(pool: web::Data<DbPool>) -> Result<HttpResponse> {
    match NewsArticle::find_all(&pool).await {
        Ok(articles) => Ok(HttpResponse::Ok().json(ApiResponse::success(articles))),
        Err(NewsError::Database(e)) => {
            error!("Database error getting all articles: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                    "Failed to retrieve articles".to_string(),
                )),
            )
        }
        Err(e) => {
            error!("Error getting all articles: {}", e);
            Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(e.to_string())))
        }
    }
}

pub async fn update(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateNewsRequest>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let article_id = path.into_inner();
    info!("Updating article {} for user: {}", article_id, user.user_id);

    let update_data = UpdateNewsArticle {
        title: request.title.clone(),
        body: request.body.clone(),
        image_url: request.image_url.clone(),
    };

    match NewsArticle::update(&pool, article_id, update_data).await {
        Ok(Some(article)) => Ok(HttpResponse::Ok().json(ApiResponse::success(article))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error(
            "Article not found".to_string(),
        ))),
        Err(NewsError::NotFound { id }) => Ok(HttpResponse::NotFound().json(
            ApiResponse::<()>::error(format!("Article {} not found", id)),
        )),
        Err(NewsError::NoUpdateFields) => Ok(HttpResponse::BadRequest().json(
            ApiResponse::<()>::error("No fields provided for update".to_string()),
        )),
        Err(NewsError::Database(e)) => {
            error!("Database error updating article: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                    "Failed to update article".to_string(),
                )),
            )
        }
    }
}

pub async fn delete(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let article_id = path.into_inner();

    if !user.is_admin() {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::<()>::error("Access denied".to_string())));
    }

    info!("Deleting article {} for user: {}", article_id, user.user_id);

    match NewsArticle::delete(&pool, article_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success(()))),
        Err(NewsError::NotFound { id }) => Ok(HttpResponse::NotFound().json(
            ApiResponse::<()>::error(format!("Article {} not found", id)),
        )),
        Err(e) => {
            error!("Error deleting article: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                    "Failed to delete article".to_string(),
                )),
            )
        }
    }
}
