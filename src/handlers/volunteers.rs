use actix_web::{web, HttpResponse, Result};
use tracing::{error, info};

use crate::database::connection::DbPool;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::volunteer::{CreateVolunteer, Volunteer};
use crate::requests::volunteer::VolunteerRequest;
use crate::utils::helpers::ApiResponse;

/// Public signup from the volunteer form.
pub async fn create(
    pool: web::Data<DbPool>,
    request: web::Json<VolunteerRequest>,
) -> Result<HttpResponse> {
    let create_volunteer = CreateVolunteer {
        fullname: request.fullname.clone(),
        email: request.email.clone(),
        phone: request.phone.clone(),
        message: request.message.clone(),
    };

    match Volunteer::create(&pool, create_volunteer).await {
        Ok(volunteer) => {
            info!("New volunteer signup: {}", volunteer.email);
            Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
                volunteer,
                "Thank you for volunteering!".to_string(),
            )))
        }
        Err(e) => {
            error!("Failed to save volunteer: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                    "Failed to save volunteer".to_string(),
                )),
            )
        }
    }
}

pub async fn all(pool: web::Data<DbPool>, _user: AuthenticatedUser) -> Result<HttpResponse> {
    match Volunteer::find_all(&pool).await {
        Ok(volunteers) => Ok(HttpResponse::Ok().json(ApiResponse::success(volunteers))),
        Err(e) => {
            error!("Failed to fetch volunteers: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                    "Failed to retrieve volunteers".to_string(),
                )),
            )
        }
    }
}
