use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::config::AuthSettings;
use crate::database::connection::DbPool;
use crate::models::auth::Claims;
use crate::models::user::User;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Issues and verifies the bearer tokens admins authenticate with.
/// Constructed once at startup and shared through `web::Data`.
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl_hours: i64,
}

impl AuthService {
    pub fn new(settings: &AuthSettings) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
            token_ttl_hours: settings.token_ttl_hours,
        }
    }

    pub fn generate_token(&self, user: &User) -> Result<String, AuthError> {
        let claims = Claims::new(
            user.id,
            user.email.clone(),
            user.user_role.clone(),
            self.token_ttl_hours,
        );
        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(data.claims)
    }

    pub async fn authenticate_user(
        &self,
        pool: &DbPool,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, AuthError> {
        Ok(User::authenticate(pool, email, password).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;
    use chrono::Utc;
    use uuid::Uuid;

    fn service() -> AuthService {
        AuthService::new(&AuthSettings {
            jwt_secret: "test-secret".to_string(),
            token_ttl_hours: 1,
            bootstrap_email: None,
            bootstrap_password: None,
        })
    }

    fn user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            fullname: "Admin".to_string(),
            email: "admin@example.org".to_string(),
            password_hash: String::new(),
            user_role: UserRole::Admin,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn issued_tokens_verify_and_carry_the_claims() {
        let service = service();
        let user = user();

        let token = service.generate_token(&user).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, UserRole::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tokens_from_another_secret_are_rejected() {
        let token = service().generate_token(&user()).unwrap();

        let other = AuthService::new(&AuthSettings {
            jwt_secret: "different-secret".to_string(),
            token_ttl_hours: 1,
            bootstrap_email: None,
            bootstrap_password: None,
        });
        assert!(other.verify_token(&token).is_err());
    }
}
