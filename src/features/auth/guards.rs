//! Capability guards for the application.
//!
//! These guards extract the authenticated user and check the role policy
//! before the handler runs. Denial always surfaces as a 403 response, never
//! a silent no-op.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::policy::Capability;
use axum::{extract::FromRequestParts, http::request::Parts};

fn authenticated(parts: &mut Parts) -> Result<AuthenticatedUser, AppError> {
    parts
        .extensions
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))
}

/// Guard for the "add item" capability (all roles).
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAddItems(user): RequireAddItems) { ... }
/// ```
pub struct RequireAddItems(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAddItems
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated(parts)?;

        if !user.can(Capability::AddItems) {
            return Err(AppError::Forbidden(
                "You do not have permission to add inventory items.".to_string(),
            ));
        }

        Ok(RequireAddItems(user))
    }
}

/// Guard for the "update item" capability (operator and admin).
pub struct RequireUpdateItems(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireUpdateItems
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated(parts)?;

        if !user.can(Capability::UpdateItems) {
            return Err(AppError::Forbidden(
                "You do not have permission to update inventory items.".to_string(),
            ));
        }

        Ok(RequireUpdateItems(user))
    }
}

/// Guard for the "delete item" capability (admin only).
pub struct RequireDeleteItems(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireDeleteItems
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated(parts)?;

        if !user.can(Capability::DeleteItems) {
            return Err(AppError::Forbidden(
                "You do not have permission to delete inventory items.".to_string(),
            ));
        }

        Ok(RequireDeleteItems(user))
    }
}

/// Guard for managing item types and locations (admin only).
pub struct RequireManageCatalog(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireManageCatalog
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated(parts)?;

        if !user.can(Capability::ManageCatalog) {
            return Err(AppError::Forbidden(
                "You do not have permission to manage item types and locations.".to_string(),
            ));
        }

        Ok(RequireManageCatalog(user))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::{routing::get, Router};
    use axum_test::TestServer;

    use super::*;
    use crate::features::auth::policy::Role;
    use crate::shared::test_helpers::with_role_auth;

    async fn update_guarded(RequireUpdateItems(_user): RequireUpdateItems) -> StatusCode {
        StatusCode::OK
    }

    async fn delete_guarded(RequireDeleteItems(_user): RequireDeleteItems) -> StatusCode {
        StatusCode::OK
    }

    async fn catalog_guarded(RequireManageCatalog(_user): RequireManageCatalog) -> StatusCode {
        StatusCode::OK
    }

    fn guarded_router() -> Router {
        Router::new()
            .route("/update", get(update_guarded))
            .route("/delete", get(delete_guarded))
            .route("/catalog", get(catalog_guarded))
    }

    #[tokio::test]
    async fn user_role_is_denied_update_and_delete() {
        let server = TestServer::new(with_role_auth(guarded_router(), Role::User)).unwrap();

        server
            .get("/update")
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server
            .get("/delete")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn operator_can_update_but_not_delete() {
        let server = TestServer::new(with_role_auth(guarded_router(), Role::Operator)).unwrap();

        server.get("/update").await.assert_status(StatusCode::OK);
        server
            .get("/delete")
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server
            .get("/catalog")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_passes_every_guard() {
        let server = TestServer::new(with_role_auth(guarded_router(), Role::Admin)).unwrap();

        server.get("/update").await.assert_status(StatusCode::OK);
        server.get("/delete").await.assert_status(StatusCode::OK);
        server.get("/catalog").await.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn unauthenticated_request_is_rejected() {
        let server = TestServer::new(guarded_router()).unwrap();

        server
            .get("/update")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
