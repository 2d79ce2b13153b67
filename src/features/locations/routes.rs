use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::locations::handlers;
use crate::features::locations::services::LocationService;

/// Location catalog routes. All behind the JWT middleware; mutations are
/// additionally guarded per handler.
pub fn routes(service: Arc<LocationService>) -> Router {
    Router::new()
        .route(
            "/api/locations",
            get(handlers::list_locations).post(handlers::create_location),
        )
        .route(
            "/api/locations/{id}",
            get(handlers::get_location)
                .put(handlers::update_location)
                .delete(handlers::delete_location),
        )
        .with_state(service)
}
