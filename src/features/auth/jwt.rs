use std::time::Duration;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, User};
use crate::features::auth::policy::Role;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: i64,
    name: String,
    email: String,
    role: Role,
    iat: i64,
    exp: i64,
}

/// Issues and verifies HS256 bearer tokens for this service.
pub struct JwtCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    validation: Validation,
}

impl JwtCodec {
    pub fn new(secret: &str, ttl: Duration, leeway: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway.as_secs();

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            validation,
        }
    }

    /// Mint a token for a freshly authenticated user.
    pub fn issue(&self, user: &User) -> Result<String> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Verify a bearer token and reconstruct the caller.
    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let claims = data.claims;
        Ok(AuthenticatedUser {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_user(role: Role) -> User {
        User {
            id: 42,
            name: "Jordan Smith".to_string(),
            email: "jordan@example.com".to_string(),
            password_hash: "unused".to_string(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn issued_token_verifies_back_to_the_same_user() {
        let codec = JwtCodec::new(
            "test-secret",
            Duration::from_secs(3600),
            Duration::from_secs(60),
        );

        let token = codec.issue(&test_user(Role::Operator)).unwrap();
        let user = codec.verify(&token).unwrap();

        assert_eq!(user.id, 42);
        assert_eq!(user.email, "jordan@example.com");
        assert_eq!(user.role, Role::Operator);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let codec = JwtCodec::new(
            "test-secret",
            Duration::from_secs(3600),
            Duration::from_secs(60),
        );
        let other = JwtCodec::new(
            "other-secret",
            Duration::from_secs(3600),
            Duration::from_secs(60),
        );

        let token = other.issue(&test_user(Role::User)).unwrap();
        assert!(matches!(codec.verify(&token), Err(AppError::Auth(_))));
    }
}
