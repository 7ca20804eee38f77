use actix_web::{web, HttpResponse, Result};
use tracing::{error, info, warn};

use crate::database::connection::DbPool;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::contact::{Contact, CreateContact};
use crate::requests::contact::ContactRequest;
use crate::services::email::EmailService;
use crate::utils::helpers::ApiResponse;

/// Public contact form. The message is stored first; forwarding it to the
/// organisation inbox is best-effort and never fails the request.
pub async fn create(
    pool: web::Data<DbPool>,
    request: web::Json<ContactRequest>,
) -> Result<HttpResponse> {
    let create_contact = CreateContact {
        name: request.name.clone(),
        email: request.email.clone(),
        message: request.message.clone(),
    };

    let contact = match Contact::create(&pool, create_contact).await {
        Ok(contact) => contact,
        Err(e) => {
            error!("Failed to save contact message: {}", e);
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                "Failed to save message".to_string(),
            )));
        }
    };

    info!("New contact message from {}", contact.email);
    forward_to_inbox(contact.clone()).await;

    Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
        contact,
        "Thank you for getting in touch!".to_string(),
    )))
}

pub async fn all(pool: web::Data<DbPool>, _user: AuthenticatedUser) -> Result<HttpResponse> {
    match Contact::find_all(&pool).await {
        Ok(contacts) => Ok(HttpResponse::Ok().json(ApiResponse::success(contacts))),
        Err(e) => {
            error!("Failed to fetch contact messages: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                    "Failed to retrieve messages".to_string(),
                )),
            )
        }
    }
}

async fn forward_to_inbox(contact: Contact) {
    // SMTP is blocking; keep it off the async workers.
    let result = web::block(move || {
        let service = EmailService::new()?;
        service.send_contact_notification(&contact.name, &contact.email, &contact.message)
    })
    .await;

    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!("Could not forward contact message: {}", e),
        Err(e) => warn!("Could not forward contact message: {}", e),
    }
}
