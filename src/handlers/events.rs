use actix_web::{web, HttpResponse, Result};
use tracing::{error, info};
use uuid::Uuid;

use crate::database::connection::DbPool;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::event::{CreateEvent, Event, EventError, UpdateEvent};
use crate::requests::event::{CreateEventRequest, UpdateEventRequest};
use crate::utils::helpers::ApiResponse;

pub async fn create(
    pool: web::Data<DbPool>,
    request: web::Json<CreateEventRequest>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    info!("Creating event for user: {}", user.user_id);

    let create_event = CreateEvent {
        title: request.title.clone(),
        description: request.description.clone(),
        location: request.location.clone(),
        event_date: request.event_date,
        image_url: request.image_url.clone(),
    };

    match Event::create(&pool, create_event).await {
        Ok(event) => {
            info!("Successfully created event with ID: {}", event.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(event)))
        }
        Err(EventError::Database(e)) => {
            error!("Database error creating event: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                    "Failed to create event".to_string(),
                )),
            )
        }
        Err(e) => {
            error!("Error creating event: {}", e);
            Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(e.to_string())))
        }
    }
}

pub async fn get_event(pool: web::Data<DbPool>, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let event_id = path.into_inner();

    match Event::find_by_id(&pool, event_id).await {
        Ok(Some(event)) => Ok(HttpResponse::Ok().json(ApiResponse::success(event))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error(
            "Event not found".to_string(),
        ))),
        Err(EventError::Database(e)) => {
            error!("Database error getting event: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                    "Failed to retrieve event".to_string(),
                )),
            )
        }
        Err(e) => {
            error!("Error getting event: {}", e);
            Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(e.to_string())))
        }
    }
}

pub async fn all(pool: web::Data<DbPool>) -> Result<HttpResponse> {
    match Event::find_all(&pool).await {
        Ok(events) => Ok(HttpResponse::Ok().json(ApiResponse::success(events))),
        Err(EventError::Database(e)) => {
            error!("Database error getting all events: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                    "Failed to retrieve events".to_string(),
                )),
            )
        }
        Err(e) => {
            error!("Error getting all events: {}", e);
            Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(e.to_string())))
        }
    }
}

pub async fn update(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateEventRequest>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let event_id = path.into_inner();
    info!("Updating event {} for user: {}", event_id, user.user_id);

    let update_data = UpdateEvent {
        title: request.title.clone(),
        description: request.description.clone(),
        location: request.location.clone(),
        event_date: request.event_date,
        image_url: request.image_url.clone(),
    };

    match Event::update(&pool, event_id, update_data).await {
        Ok(Some(event)) => Ok(HttpResponse::Ok().json(ApiResponse::success(event))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error(
            "Event not found".to_string(),
        ))),
        Err(EventError::NotFound { id }) => Ok(HttpResponse::NotFound().json(
            ApiResponse::<()>::error(format!("Event {} not found", id)),
        )),
        Err(EventError::NoUpdateFields) => Ok(HttpResponse::BadRequest().json(
            ApiResponse::<()>::error("No fields provided for update".to_string()),
        )),
        Err(EventError::Database(e)) => {
            error!("Database error updating event: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                    "Failed to update event".to_string(),
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
    let event_id = path.into_inner();

    if !user.is_admin() {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::<()>::error("Access denied".to_string())));
    }

    info!("Deleting event {} for user: {}", event_id, user.user_id);

    match Event::delete(&pool, event_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success(()))),
        Err(EventError::NotFound { id }) => Ok(HttpResponse::NotFound().json(
            ApiResponse::<()>::error(format!("Event {} not found", id)),
        )),
        Err(e) => {
            error!("Error deleting event: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                    "Failed to delete event".to_string(),
                )),
            )
        }
    }
}
