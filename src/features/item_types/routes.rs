use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::item_types::handlers;
use crate::features::item_types::services::ItemTypeService;

/// Item type catalog routes. All behind the JWT middleware; mutations are
/// additionally guarded per handler.
pub fn routes(service: Arc<ItemTypeService>) -> Router {
    Router::new()
        .route(
            "/api/item-types",
            get(handlers::list_item_types).post(handlers::create_item_type),
        )
        .route(
            "/api/item-types/{id}",
            get(handlers::get_item_type)
                .put(handlers::update_item_type)
                .delete(handlers::delete_item_type),
        )
        .with_state(service)
}
