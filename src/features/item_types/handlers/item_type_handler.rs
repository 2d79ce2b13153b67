use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireManageCatalog;
use crate::features::item_types::dtos::{
    ItemTypeResponseDto, ListItemTypesQuery, SaveItemTypeDto,
};
use crate::features::item_types::services::ItemTypeService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List item types
#[utoipa::path(
    get,
    path = "/api/item-types",
    params(ListItemTypesQuery, PaginationQuery),
    responses(
        (status = 200, description = "List of item types", body = ApiResponse<Vec<ItemTypeResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "item-types",
    security(("bearer_auth" = []))
)]
pub async fn list_item_types(
    State(service): State<Arc<ItemTypeService>>,
    Query(query): Query<ListItemTypesQuery>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ItemTypeResponseDto>>>> {
    let (types, total) = service.list(query.active, &pagination).await?;
    let data = types.into_iter().map(ItemTypeResponseDto::from).collect();
    Ok(Json(ApiResponse::success(
        Some(data),
        None,
        Some(Meta { total }),
    )))
}

/// Get a single item type by id
#[utoipa::path(
    get,
    path = "/api/item-types/{id}",
    params(("id" = i64, Path, description = "Item type id")),
    responses(
        (status = 200, description = "Item type", body = ApiResponse<ItemTypeResponseDto>),
        (status = 404, description = "Not found")
    ),
    tag = "item-types",
    security(("bearer_auth" = []))
)]
pub async fn get_item_type(
    State(service): State<Arc<ItemTypeService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ItemTypeResponseDto>>> {
    let item_type = service.get(id).await?;
    Ok(Json(ApiResponse::success(
        Some(item_type.into()),
        None,
        None,
    )))
}

/// Create an item type (admin only)
#[utoipa::path(
    post,
    path = "/api/item-types",
    request_body = SaveItemTypeDto,
    responses(
        (status = 201, description = "Item type created", body = ApiResponse<ItemTypeResponseDto>),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Validation error")
    ),
    tag = "item-types",
    security(("bearer_auth" = []))
)]
pub async fn create_item_type(
    RequireManageCatalog(_user): RequireManageCatalog,
    State(service): State<Arc<ItemTypeService>>,
    AppJson(dto): AppJson<SaveItemTypeDto>,
) -> Result<(StatusCode, Json<ApiResponse<ItemTypeResponseDto>>)> {
    dto.validate().map_err(AppError::from)?;

    let item_type = service.create(&dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(item_type.into()),
            Some("Item type created successfully.".to_string()),
            None,
        )),
    ))
}

/// Update an item type (admin only)
#[utoipa::path(
    put,
    path = "/api/item-types/{id}",
    params(("id" = i64, Path, description = "Item type id")),
    request_body = SaveItemTypeDto,
    responses(
        (status = 200, description = "Item type updated", body = ApiResponse<ItemTypeResponseDto>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "item-types",
    security(("bearer_auth" = []))
)]
pub async fn update_item_type(
    RequireManageCatalog(_user): RequireManageCatalog,
    State(service): State<Arc<ItemTypeService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<SaveItemTypeDto>,
) -> Result<Json<ApiResponse<ItemTypeResponseDto>>> {
    dto.validate().map_err(AppError::from)?;

    let item_type = service.update(id, &dto).await?;
    Ok(Json(ApiResponse::success(
        Some(item_type.into()),
        Some("Item type updated successfully.".to_string()),
        None,
    )))
}

/// Delete an item type (admin only, refused while items reference it)
#[utoipa::path(
    delete,
    path = "/api/item-types/{id}",
    params(("id" = i64, Path, description = "Item type id")),
    responses(
        (status = 200, description = "Item type deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Items still reference this type")
    ),
    tag = "item-types",
    security(("bearer_auth" = []))
)]
pub async fn delete_item_type(
    RequireManageCatalog(_user): RequireManageCatalog,
    State(service): State<Arc<ItemTypeService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Item type deleted successfully.".to_string()),
        None,
    )))
}
