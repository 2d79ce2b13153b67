use std::sync::Arc;

use axum::{extract::FromRef, routing::get, Router};

use crate::features::inventory::handlers;
use crate::features::inventory::services::{ExportService, InventoryService};

/// Shared state for the inventory routes
#[derive(Clone, FromRef)]
pub struct InventoryState {
    pub items: Arc<InventoryService>,
    pub export: Arc<ExportService>,
}

/// Inventory routes. All behind the JWT middleware; mutations are guarded
/// per handler.
pub fn routes(state: InventoryState) -> Router {
    Router::new()
        .route(
            "/api/inventory",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route("/api/inventory/export", get(handlers::export_items))
        .route(
            "/api/inventory/{id}",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
        .with_state(state)
}
