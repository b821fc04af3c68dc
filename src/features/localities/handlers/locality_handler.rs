use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::localities::dtos::{
    LocalityDirectoryDto, LocalityDirectoryListDto, LocalityDirectoryQuery,
};
use crate::features::localities::services::LocalityService;
use crate::shared::types::ApiResponse;

/// List all active localities with their representatives
#[utoipa::path(
    get,
    path = "/api/reports/localities/all",
    params(LocalityDirectoryQuery),
    responses(
        (status = 200, description = "Active localities with representatives", body = ApiResponse<LocalityDirectoryListDto>)
    ),
    tag = "localities"
)]
pub async fn list_localities(
    State(service): State<Arc<LocalityService>>,
    Query(query): Query<LocalityDirectoryQuery>,
) -> Result<Json<ApiResponse<LocalityDirectoryListDto>>> {
    let items = service.list_active(&query).await?;
    let total = items.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(LocalityDirectoryListDto { items, total }),
        None,
        None,
    )))
}

/// Get one locality with its representatives
#[utoipa::path(
    get,
    path = "/api/reports/localities/{id}",
    params(
        ("id" = i64, Path, description = "Locality ID")
    ),
    responses(
        (status = 200, description = "Locality found", body = ApiResponse<LocalityDirectoryDto>),
        (status = 404, description = "Locality not found")
    ),
    tag = "localities"
)]
pub async fn get_locality(
    State(service): State<Arc<LocalityService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<LocalityDirectoryDto>>> {
    let locality = service.get_active(id).await?;
    Ok(Json(ApiResponse::success(Some(locality), None, None)))
}
