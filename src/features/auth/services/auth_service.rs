use std::sync::Arc;

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{LoginRequestDto, LoginResponseDto};
use crate::features::auth::jwt::JwtCodec;
use crate::features::auth::model::{AuthenticatedUser, User};

/// Service for credential verification and token issuance
pub struct AuthService {
    pool: PgPool,
    codec: Arc<JwtCodec>,
}

impl AuthService {
    pub fn new(pool: PgPool, codec: Arc<JwtCodec>) -> Self {
        Self { pool, codec }
    }

    /// Verify email/password and mint a bearer token.
    pub async fn login(&self, dto: LoginRequestDto) -> Result<LoginResponseDto> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(&dto.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user by email: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::Auth("Invalid email or password".to_string()))?;

        if !verify_password(&dto.password, &user.password_hash) {
            return Err(AppError::Auth("Invalid email or password".to_string()));
        }

        let token = self.codec.issue(&user)?;

        tracing::info!("User logged in: id={}, role={}", user.id, user.role);

        Ok(LoginResponseDto {
            token,
            user: AuthenticatedUser {
                id: user.id,
                name: user.name,
                email: user.email,
                role: user.role,
            },
        })
    }

    /// Create the initial admin account if the users table is empty.
    ///
    /// Returns `true` when an account was created. A non-empty table is left
    /// untouched so this is safe to call on every startup.
    pub async fn bootstrap_admin(&self, email: &str, password: &str) -> Result<bool> {
        let has_users: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users)")
            .fetch_one(&self.pool)
            .await?;
        if has_users {
            return Ok(false);
        }

        let password_hash = hash_password(password)?;
        sqlx::query(
            "INSERT INTO users (name, email, password_hash, role) \
             VALUES ('Administrator', $1, $2, 'admin')",
        )
        .bind(email)
        .bind(&password_hash)
        .execute(&self.pool)
        .await?;

        Ok(true)
    }
}

/// Hash a password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a stored PHC-format hash.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::error!("Stored password hash is malformed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_password_verifies_and_rejects_wrong_input() {
        let hash = hash_password("correct horse battery staple").unwrap();

        assert!(verify_password("correct horse battery staple", &hash));
        assert!(!verify_password("wrong password", &hash));
    }

    #[test]
    fn malformed_stored_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
