use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::features::auth::policy::{self, Capability, Role};

/// Database model for a user account.
///
/// Never serialized: the password hash must not leave the service.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The authenticated caller, reconstructed from a verified JWT and carried in
/// request extensions.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn can(&self, capability: Capability) -> bool {
        policy::allows(self.role, capability)
    }
}
