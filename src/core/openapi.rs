use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::inventory::{
    dtos as inventory_dtos, handlers as inventory_handlers, models as inventory_models,
};
use crate::features::item_types::{dtos as item_types_dtos, handlers as item_types_handlers};
use crate::features::locations::{dtos as locations_dtos, handlers as locations_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::login,
        auth::handlers::get_me,
        // Inventory
        inventory_handlers::list_items,
        inventory_handlers::get_item,
        inventory_handlers::create_item,
        inventory_handlers::update_item,
        inventory_handlers::delete_item,
        inventory_handlers::export_items,
        // Item types
        item_types_handlers::list_item_types,
        item_types_handlers::get_item_type,
        item_types_handlers::create_item_type,
        item_types_handlers::update_item_type,
        item_types_handlers::delete_item_type,
        // Locations
        locations_handlers::list_locations,
        locations_handlers::get_location,
        locations_handlers::create_location,
        locations_handlers::update_location,
        locations_handlers::delete_location,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::AuthenticatedUser,
            auth::policy::Role,
            auth::dtos::LoginRequestDto,
            auth::dtos::LoginResponseDto,
            ApiResponse<auth::dtos::LoginResponseDto>,
            ApiResponse<auth::model::AuthenticatedUser>,
            // Inventory
            inventory_models::ItemStatus,
            inventory_dtos::ItemFilter,
            inventory_dtos::SaveItemDto,
            inventory_dtos::ItemResponseDto,
            inventory_dtos::ItemPageDto,
            ApiResponse<inventory_dtos::ItemPageDto>,
            ApiResponse<inventory_dtos::ItemResponseDto>,
            // Item types
            item_types_dtos::SaveItemTypeDto,
            item_types_dtos::ItemTypeResponseDto,
            ApiResponse<Vec<item_types_dtos::ItemTypeResponseDto>>,
            ApiResponse<item_types_dtos::ItemTypeResponseDto>,
            // Locations
            locations_dtos::SaveLocationDto,
            locations_dtos::LocationResponseDto,
            ApiResponse<Vec<locations_dtos::LocationResponseDto>>,
            ApiResponse<locations_dtos::LocationResponseDto>,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "inventory", description = "Inventory item tracking and CSV export"),
        (name = "item-types", description = "Item type catalog (mutations admin only)"),
        (name = "locations", description = "Location catalog (mutations admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Stocktake API",
        version = "0.1.0",
        description = "API documentation for Stocktake",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
