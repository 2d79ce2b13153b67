use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, Response, StatusCode},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{RequireAddItems, RequireDeleteItems, RequireUpdateItems};
use crate::features::inventory::dtos::{ItemFilter, ItemPageDto, ItemResponseDto, SaveItemDto};
use crate::features::inventory::services::{export_filename, ExportService, InventoryService};
use crate::shared::types::{ApiResponse, PaginationQuery};

/// List inventory items with filters and pagination
#[utoipa::path(
    get,
    path = "/api/inventory",
    params(ItemFilter, PaginationQuery),
    responses(
        (status = 200, description = "Page of inventory items", body = ApiResponse<ItemPageDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "inventory",
    security(("bearer_auth" = []))
)]
pub async fn list_items(
    State(service): State<Arc<InventoryService>>,
    Query(filter): Query<ItemFilter>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<ItemPageDto>>> {
    let (items, total) = service.list(&filter, &pagination).await?;

    let page = ItemPageDto {
        items: items.into_iter().map(ItemResponseDto::from).collect(),
        total,
        page: pagination.page.max(1),
        page_size: pagination.limit(),
        last_page: pagination.last_page(total),
        filters: filter,
    };
    Ok(Json(ApiResponse::success(Some(page), None, None)))
}

/// Get a single inventory item by id
#[utoipa::path(
    get,
    path = "/api/inventory/{id}",
    params(("id" = i64, Path, description = "Inventory item id")),
    responses(
        (status = 200, description = "Inventory item", body = ApiResponse<ItemResponseDto>),
        (status = 404, description = "Not found")
    ),
    tag = "inventory",
    security(("bearer_auth" = []))
)]
pub async fn get_item(
    State(service): State<Arc<InventoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ItemResponseDto>>> {
    let item = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(item.into()), None, None)))
}

/// Create an inventory item
#[utoipa::path(
    post,
    path = "/api/inventory",
    request_body = SaveItemDto,
    responses(
        (status = 201, description = "Item created", body = ApiResponse<ItemResponseDto>),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Validation error")
    ),
    tag = "inventory",
    security(("bearer_auth" = []))
)]
pub async fn create_item(
    RequireAddItems(user): RequireAddItems,
    State(service): State<Arc<InventoryService>>,
    AppJson(dto): AppJson<SaveItemDto>,
) -> Result<(StatusCode, Json<ApiResponse<ItemResponseDto>>)> {
    dto.validate().map_err(AppError::from)?;

    let item = service.create(&dto, user.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(item.into()),
            Some("Item created successfully.".to_string()),
            None,
        )),
    ))
}

/// Update an inventory item
#[utoipa::path(
    put,
    path = "/api/inventory/{id}",
    params(("id" = i64, Path, description = "Inventory item id")),
    request_body = SaveItemDto,
    responses(
        (status = 200, description = "Item updated", body = ApiResponse<ItemResponseDto>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "inventory",
    security(("bearer_auth" = []))
)]
pub async fn update_item(
    RequireUpdateItems(user): RequireUpdateItems,
    State(service): State<Arc<InventoryService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<SaveItemDto>,
) -> Result<Json<ApiResponse<ItemResponseDto>>> {
    dto.validate().map_err(AppError::from)?;

    let item = service.update(id, &dto, user.id).await?;
    Ok(Json(ApiResponse::success(
        Some(item.into()),
        Some("Item updated successfully.".to_string()),
        None,
    )))
}

/// Delete an inventory item
#[utoipa::path(
    delete,
    path = "/api/inventory/{id}",
    params(("id" = i64, Path, description = "Inventory item id")),
    responses(
        (status = 200, description = "Item deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    ),
    tag = "inventory",
    security(("bearer_auth" = []))
)]
pub async fn delete_item(
    RequireDeleteItems(_user): RequireDeleteItems,
    State(service): State<Arc<InventoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Item deleted successfully.".to_string()),
        None,
    )))
}

/// Export the filtered inventory as CSV
#[utoipa::path(
    get,
    path = "/api/inventory/export",
    params(ItemFilter),
    responses(
        (status = 200, description = "CSV download", content_type = "text/csv"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "inventory",
    security(("bearer_auth" = []))
)]
pub async fn export_items(
    State(service): State<Arc<ExportService>>,
    Query(filter): Query<ItemFilter>,
) -> Result<Response<Body>> {
    let body = service.stream_csv(filter);

    Response::builder()
        .header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export_filename()),
        )
        .body(body)
        .map_err(|e| AppError::Internal(e.to_string()))
}
