use actix_web::{
    dev::Payload,
    error::{ErrorInternalServerError, ErrorUnauthorized},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpRequest,
};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::models::user::UserRole;
use crate::services::auth::AuthService;

/// Extractor for handlers that require a valid bearer token.
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub user_role: UserRole,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.user_role == UserRole::SuperAdmin || self.user_role == UserRole::Admin
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let auth_service = req
        .app_data::<web::Data<AuthService>>()
        .ok_or_else(|| ErrorInternalServerError("Authentication service not configured"))?;

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ErrorUnauthorized("Missing authorization header"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ErrorUnauthorized("Invalid authorization header"))?;

    let claims = auth_service
        .verify_token(token)
        .map_err(|_| ErrorUnauthorized("Invalid or expired token"))?;

    Ok(AuthenticatedUser {
        user_id: claims.sub,
        email: claims.email,
        user_role: claims.role,
    })
}
