#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
use fake::{faker::internet::en::SafeEmail, faker::name::en::Name, Fake};

#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;
#[cfg(test)]
use crate::features::auth::policy::Role;

#[cfg(test)]
pub fn create_test_user(role: Role) -> AuthenticatedUser {
    AuthenticatedUser {
        id: 1,
        name: Name().fake(),
        email: SafeEmail().fake(),
        role,
    }
}

/// Wrap a router with middleware that injects a fabricated authenticated user
/// of the given role, bypassing JWT verification for tests.
#[cfg(test)]
pub fn with_role_auth(router: Router, role: Role) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| async move {
            request.extensions_mut().insert(create_test_user(role));
            let response: Response = next.run(request).await;
            response
        },
    ))
}
