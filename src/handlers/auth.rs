use actix_web::{web, HttpResponse, Result};
use tracing::{error, info};

use crate::{
    database::connection::DbPool,
    middleware::auth::AuthenticatedUser,
    models::{
        auth::{AuthResponse, LoginRequest, RegisterRequest, UserInfo},
        user::{CreateUser, User, UserError, UserRole},
    },
    services::auth::AuthService,
    utils::helpers::ApiResponse,
};

/// Register a new admin account. Only a SuperAdmin may add staff.
pub async fn register(
    pool: web::Data<DbPool>,
    auth_service: web::Data<AuthService>,
    request: web::Json<RegisterRequest>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    if user.user_role != UserRole::SuperAdmin {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error(
            "You don't have permission to perform this action".to_string(),
        )));
    }

    let user_role = match request.user_role.as_ref() {
        Some(role_str) => role_str.parse().unwrap_or(UserRole::Editor),
        None => UserRole::Editor,
    };

    let create_user = CreateUser {
        fullname: request.fullname.clone(),
        email: request.email.clone(),
        password: request.password.clone(),
        user_role,
    };

    let created = match User::create(&pool, create_user).await {
        Ok(created) => created,
        Err(UserError::EmailTaken) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(
                "Email address already registered".to_string(),
            )));
        }
        Err(e) => {
            error!("Failed to create user: {}", e);
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                "Failed to create user".to_string(),
            )));
        }
    };

    info!("Registered admin {} by {}", created.email, user.user_id);

    let token = auth_service.generate_token(&created).map_err(|e| {
        error!("Failed to generate token: {}", e);
        actix_web::error::ErrorInternalServerError("Failed to generate token")
    })?;

    let response = AuthResponse {
        token,
        user: UserInfo {
            id: created.id,
            fullname: created.fullname,
            email: created.email,
        },
    };

    Ok(HttpResponse::Created().json(ApiResponse::success(response)))
}

pub async fn login(
    pool: web::Data<DbPool>,
    auth_service: web::Data<AuthService>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let user = auth_service
        .authenticate_user(&pool, &request.email, &request.password)
        .await
        .map_err(|e| {
            error!("Authentication error: {}", e);
            actix_web::error::ErrorInternalServerError("Authentication error")
        })?
        .ok_or_else(|| {
            error!("Invalid credentials for user: {}", request.email);
            actix_web::error::ErrorUnauthorized("Invalid credentials")
        })?;

    let token = auth_service.generate_token(&user).map_err(|e| {
        error!("Failed to generate token: {}", e);
        actix_web::error::ErrorInternalServerError("Failed to generate token")
    })?;

    let response = AuthResponse {
        token,
        user: UserInfo {
            id: user.id,
            fullname: user.fullname,
            email: user.email,
        },
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}
