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
use crate::features::locations::dtos::{ListLocationsQuery, LocationResponseDto, SaveLocationDto};
use crate::features::locations::services::LocationService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List locations
#[utoipa::path(
    get,
    path = "/api/locations",
    params(ListLocationsQuery, PaginationQuery),
    responses(
        (status = 200, description = "List of locations", body = ApiResponse<Vec<LocationResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn list_locations(
    State(service): State<Arc<LocationService>>,
    Query(query): Query<ListLocationsQuery>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<LocationResponseDto>>>> {
    let (locations, total) = service.list(query.active, &pagination).await?;
    let data = locations
        .into_iter()
        .map(LocationResponseDto::from)
        .collect();
    Ok(Json(ApiResponse::success(
        Some(data),
        None,
        Some(Meta { total }),
    )))
}

/// Get a single location by id
#[utoipa::path(
    get,
    path = "/api/locations/{id}",
    params(("id" = i64, Path, description = "Location id")),
    responses(
        (status = 200, description = "Location", body = ApiResponse<LocationResponseDto>),
        (status = 404, description = "Not found")
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn get_location(
    State(service): State<Arc<LocationService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<LocationResponseDto>>> {
    let location = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(location.into()), None, None)))
}

/// Create a location (admin only)
#[utoipa::path(
    post,
    path = "/api/locations",
    request_body = SaveLocationDto,
    responses(
        (status = 201, description = "Location created", body = ApiResponse<LocationResponseDto>),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Validation error")
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn create_location(
    RequireManageCatalog(_user): RequireManageCatalog,
    State(service): State<Arc<LocationService>>,
    AppJson(dto): AppJson<SaveLocationDto>,
) -> Result<(StatusCode, Json<ApiResponse<LocationResponseDto>>)> {
    dto.validate().map_err(AppError::from)?;

    let location = service.create(&dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(location.into()),
            Some("Location created successfully.".to_string()),
            None,
        )),
    ))
}

/// Update a location (admin only)
#[utoipa::path(
    put,
    path = "/api/locations/{id}",
    params(("id" = i64, Path, description = "Location id")),
    request_body = SaveLocationDto,
    responses(
        (status = 200, description = "Location updated", body = ApiResponse<LocationResponseDto>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn update_location(
    RequireManageCatalog(_user): RequireManageCatalog,
    State(service): State<Arc<LocationService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<SaveLocationDto>,
) -> Result<Json<ApiResponse<LocationResponseDto>>> {
    dto.validate().map_err(AppError::from)?;

    let location = service.update(id, &dto).await?;
    Ok(Json(ApiResponse::success(
        Some(location.into()),
        Some("Location updated successfully.".to_string()),
        None,
    )))
}

/// Delete a location (admin only, refused while items reference it)
#[utoipa::path(
    delete,
    path = "/api/locations/{id}",
    params(("id" = i64, Path, description = "Location id")),
    responses(
        (status = 200, description = "Location deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Items still reference this location")
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn delete_location(
    RequireManageCatalog(_user): RequireManageCatalog,
    State(service): State<Arc<LocationService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Location deleted successfully.".to_string()),
        None,
    )))
}
