use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::CurrentUser;
use crate::features::issues::dtos::{
    CreateIssueDto, CreateIssueForm, IssueFilterQuery, IssueListDto, IssueMapDto, IssueResponseDto,
    MapQuery, UpdateIssueStatusForm,
};
use crate::features::issues::models::{IssueStatus, IssueType};
use crate::features::issues::services::{IssueService, NearbyQuery, PhotoUpload, TransitionRequest};
use crate::shared::types::{ApiResponse, PaginationQuery};

/// Create a new issue report
///
/// Accepts multipart/form-data with:
/// - `issue_type`: water, electricity, road or garbage (required)
/// - `description`: detailed description (required)
/// - `latitude` / `longitude`: location (required)
/// - `locality_id`: ward or village id (optional)
/// - `photos`: up to the configured number of photos (optional, repeatable)
///
/// When the locality has an active representative the issue is persisted
/// directly in 'assigned' status, bound to that representative.
#[utoipa::path(
    post,
    path = "/api/reports",
    tag = "reports",
    request_body(
        content = CreateIssueForm,
        content_type = "multipart/form-data",
        description = "Issue report form with photo uploads",
    ),
    responses(
        (status = 201, description = "Issue created", body = ApiResponse<IssueResponseDto>),
        (status = 400, description = "Invalid input or photo batch"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Locality not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_issue(
    user: CurrentUser,
    State(service): State<Arc<IssueService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<IssueResponseDto>>)> {
    let mut issue_type: Option<IssueType> = None;
    let mut description: Option<String> = None;
    let mut latitude: Option<f64> = None;
    let mut longitude: Option<f64> = None;
    let mut locality_id: Option<i64> = None;
    let mut photos: Vec<PhotoUpload> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "issue_type" => {
                let text = read_text_field(field, "issue_type").await?;
                issue_type =
                    Some(IssueType::from_str(&text).map_err(AppError::Validation)?);
            }
            "description" => {
                description = Some(read_text_field(field, "description").await?);
            }
            "latitude" => {
                let text = read_text_field(field, "latitude").await?;
                latitude = Some(text.trim().parse::<f64>().map_err(|_| {
                    AppError::Validation("latitude must be a number".to_string())
                })?);
            }
            "longitude" => {
                let text = read_text_field(field, "longitude").await?;
                longitude = Some(text.trim().parse::<f64>().map_err(|_| {
                    AppError::Validation("longitude must be a number".to_string())
                })?);
            }
            "locality_id" => {
                let text = read_text_field(field, "locality_id").await?;
                if !text.trim().is_empty() {
                    locality_id = Some(text.trim().parse::<i64>().map_err(|_| {
                        AppError::Validation("locality_id must be an integer".to_string())
                    })?);
                }
            }
            "photos" => {
                photos.push(read_photo_field(field).await?);
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let dto = CreateIssueDto {
        issue_type: issue_type
            .ok_or_else(|| AppError::BadRequest("issue_type is required".to_string()))?,
        description: description
            .ok_or_else(|| AppError::BadRequest("description is required".to_string()))?,
        latitude: latitude
            .ok_or_else(|| AppError::BadRequest("latitude is required".to_string()))?,
        longitude: longitude
            .ok_or_else(|| AppError::BadRequest("longitude is required".to_string()))?,
        locality_id,
    };

    let response = service.create(&user, dto, photos).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(response), None, None)),
    ))
}

/// Get the current user's issue reports (paginated)
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "reports",
    params(PaginationQuery, IssueFilterQuery),
    responses(
        (status = 200, description = "Paginated list of the caller's issues", body = ApiResponse<IssueListDto>),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_my_issues(
    user: CurrentUser,
    State(service): State<Arc<IssueService>>,
    Query(pagination): Query<PaginationQuery>,
    Query(filter): Query<IssueFilterQuery>,
) -> Result<Json<ApiResponse<IssueListDto>>> {
    let list = service
        .list_by_reporter(user.id, &filter, &pagination)
        .await?;
    Ok(Json(ApiResponse::success(Some(list), None, None)))
}

/// Get issues near a location for map display
#[utoipa::path(
    get,
    path = "/api/reports/map",
    tag = "reports",
    params(MapQuery),
    responses(
        (status = 200, description = "Issues within the radius", body = ApiResponse<Vec<IssueMapDto>>),
        (status = 400, description = "Invalid query parameters")
    )
)]
pub async fn map_issues(
    State(service): State<Arc<IssueService>>,
    Query(query): Query<MapQuery>,
) -> Result<Json<ApiResponse<Vec<IssueMapDto>>>> {
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let pins = service
        .nearby(&NearbyQuery {
            latitude: query.latitude,
            longitude: query.longitude,
            radius_km: query.radius,
            issue_type: query.issue_type,
            status: query.status,
        })
        .await?;

    Ok(Json(ApiResponse::success(Some(pins), None, None)))
}

/// Get a specific issue report
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    tag = "reports",
    params(
        ("id" = i64, Path, description = "Issue ID")
    ),
    responses(
        (status = 200, description = "Issue found", body = ApiResponse<IssueResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Issue not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_issue(
    _user: CurrentUser,
    State(service): State<Arc<IssueService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<IssueResponseDto>>> {
    let issue = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(issue), None, None)))
}

/// Move an issue to the next lifecycle status
///
/// Accepts multipart/form-data with:
/// - `status`: the target status (required, must be the immediate successor)
/// - `progress_notes`: optional notes from the acting representative
/// - `completion_description`: required when the target is pwd_completed
/// - `completion_photo`: optional photo of the finished work (pwd_completed only)
#[utoipa::path(
    patch,
    path = "/api/reports/{id}/status",
    tag = "reports",
    params(
        ("id" = i64, Path, description = "Issue ID")
    ),
    request_body(
        content = UpdateIssueStatusForm,
        content_type = "multipart/form-data",
        description = "Status transition form",
    ),
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<IssueResponseDto>),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Wrong role or not the assigned representative"),
        (status = 404, description = "Issue not found"),
        (status = 409, description = "Source status does not match the issue's current status")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_issue_status(
    user: CurrentUser,
    State(service): State<Arc<IssueService>>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<IssueResponseDto>>> {
    let mut target_status: Option<IssueStatus> = None;
    let mut progress_notes: Option<String> = None;
    let mut completion_description: Option<String> = None;
    let mut completion_photo: Option<PhotoUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "status" => {
                let text = read_text_field(field, "status").await?;
                target_status =
                    Some(IssueStatus::from_str(&text).map_err(AppError::Validation)?);
            }
            "progress_notes" => {
                let text = read_text_field(field, "progress_notes").await?;
                if !text.is_empty() {
                    progress_notes = Some(text);
                }
            }
            "completion_description" => {
                let text = read_text_field(field, "completion_description").await?;
                if !text.is_empty() {
                    completion_description = Some(text);
                }
            }
            "completion_photo" => {
                completion_photo = Some(read_photo_field(field).await?);
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let request = TransitionRequest {
        target_status: target_status
            .ok_or_else(|| AppError::BadRequest("status is required".to_string()))?,
        progress_notes,
        completion_description,
        completion_photo,
    };

    let issue = service.transition(&user, id, request).await?;
    Ok(Json(ApiResponse::success(Some(issue), None, None)))
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read {} field: {}", name, e)))
}

async fn read_photo_field(field: axum::extract::multipart::Field<'_>) -> Result<PhotoUpload> {
    let content_type = field
        .content_type()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let filename = field
        .file_name()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "image.jpg".to_string());

    let data = field.bytes().await.map_err(|e| {
        debug!("Failed to read photo bytes: {}", e);
        AppError::BadRequest(format!("Failed to read photo data: {}", e))
    })?;

    Ok(PhotoUpload {
        data: data.to_vec(),
        filename,
        content_type,
    })
}
