use actix_web::{web, HttpResponse, Result};
use tracing::{error, info};

use crate::database::connection::DbPool;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::subscriber::{Subscriber, SubscriberError};
use crate::requests::subscriber::SubscribeRequest;
use crate::utils::helpers::ApiResponse;

/// Public newsletter signup.
pub async fn create(
    pool: web::Data<DbPool>,
    request: web::Json<SubscribeRequest>,
) -> Result<HttpResponse> {
    match Subscriber::create(&pool, request.email.clone()).await {
        Ok(subscriber) => {
            info!("New subscriber: {}", subscriber.email);
            Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
                subscriber,
                "Subscribed".to_string(),
            )))
        }
        Err(SubscriberError::AlreadySubscribed) => Ok(HttpResponse::BadRequest().json(
            ApiResponse::<()>::error("Email address already subscribed".to_string()),
        )),
        Err(SubscriberError::Database(e)) => {
            error!("Failed to save subscriber: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                    "Failed to subscribe".to_string(),
                )),
            )
        }
    }
}

pub async fn all(pool: web::Data<DbPool>, _user: AuthenticatedUser) -> Result<HttpResponse> {
    match Subscriber::find_all(&pool).await {
        Ok(subscribers) => Ok(HttpResponse::Ok().json(ApiResponse::success(subscribers))),
        Err(e) => {
            error!("Failed to fetch subscribers: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                    "Failed to retrieve subscribers".to_string(),
                )),
            )
        }
    }
}
