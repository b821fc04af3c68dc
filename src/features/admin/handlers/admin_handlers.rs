use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::admin::dtos::{
    AdminLocalityDto, AdminLocalityListDto, AdminLocalityQuery, AdminUserDto, AdminUserListDto,
    AdminUserQuery, CreateLocalityDto, CreateStaffDto, UpdateLocalityDto, UpdateUserDto,
};
use crate::features::admin::services::AdminService;
use crate::features::auth::model::CurrentUser;
use crate::features::issues::services::IssueService;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// State for admin handlers
#[derive(Clone)]
pub struct AdminState {
    pub admin_service: Arc<AdminService>,
    pub issue_service: Arc<IssueService>,
}

fn require_admin(user: &CurrentUser) -> Result<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Administrator privileges required".to_string(),
        ))
    }
}

// ==================== Locality Management ====================

/// Create a new locality (ward/village)
#[utoipa::path(
    post,
    path = "/api/admin/localities",
    tag = "admin",
    request_body = CreateLocalityDto,
    responses(
        (status = 201, description = "Locality created", body = ApiResponse<AdminLocalityDto>),
        (status = 403, description = "Administrator privileges required"),
        (status = 409, description = "Locality with this name and type already exists")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_locality(
    user: CurrentUser,
    State(state): State<AdminState>,
    AppJson(dto): AppJson<CreateLocalityDto>,
) -> Result<(StatusCode, Json<ApiResponse<AdminLocalityDto>>)> {
    require_admin(&user)?;
    let locality = state.admin_service.create_locality(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(locality), None, None)),
    ))
}

/// Get all localities (paginated)
#[utoipa::path(
    get,
    path = "/api/admin/localities",
    tag = "admin",
    params(PaginationQuery, AdminLocalityQuery),
    responses(
        (status = 200, description = "Paginated list of localities", body = ApiResponse<AdminLocalityListDto>),
        (status = 403, description = "Administrator privileges required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_localities(
    user: CurrentUser,
    State(state): State<AdminState>,
    Query(pagination): Query<PaginationQuery>,
    Query(query): Query<AdminLocalityQuery>,
) -> Result<Json<ApiResponse<AdminLocalityListDto>>> {
    require_admin(&user)?;
    let list = state
        .admin_service
        .list_localities(&query, &pagination)
        .await?;
    Ok(Json(ApiResponse::success(Some(list), None, None)))
}

/// Get locality details
#[utoipa::path(
    get,
    path = "/api/admin/localities/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "Locality ID")),
    responses(
        (status = 200, description = "Locality found", body = ApiResponse<AdminLocalityDto>),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "Locality not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_locality(
    user: CurrentUser,
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<AdminLocalityDto>>> {
    require_admin(&user)?;
    let locality = state.admin_service.get_locality(id).await?;
    Ok(Json(ApiResponse::success(Some(locality), None, None)))
}

/// Update a locality's name or status
#[utoipa::path(
    patch,
    path = "/api/admin/localities/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "Locality ID")),
    request_body = UpdateLocalityDto,
    responses(
        (status = 200, description = "Locality updated", body = ApiResponse<AdminLocalityDto>),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "Locality not found"),
        (status = 409, description = "Locality with this name and type already exists")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_locality(
    user: CurrentUser,
    State(state): State<AdminState>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateLocalityDto>,
) -> Result<Json<ApiResponse<AdminLocalityDto>>> {
    require_admin(&user)?;
    let locality = state.admin_service.update_locality(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(locality), None, None)))
}

/// Delete a locality. Fails while issues or users still reference it.
#[utoipa::path(
    delete,
    path = "/api/admin/localities/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "Locality ID")),
    responses(
        (status = 204, description = "Locality deleted"),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "Locality not found"),
        (status = 409, description = "Locality is still referenced")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_locality(
    user: CurrentUser,
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    require_admin(&user)?;
    state.admin_service.delete_locality(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================== Staff Management ====================

/// Create a new staff user (representative, PWD worker, or admin)
#[utoipa::path(
    post,
    path = "/api/admin/users",
    tag = "admin",
    request_body = CreateStaffDto,
    responses(
        (status = 201, description = "User created", body = ApiResponse<AdminUserDto>),
        (status = 400, description = "Invalid role or inactive locality"),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "Locality not found"),
        (status = 409, description = "User with this mobile number and role already exists")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_staff(
    user: CurrentUser,
    State(state): State<AdminState>,
    AppJson(dto): AppJson<CreateStaffDto>,
) -> Result<(StatusCode, Json<ApiResponse<AdminUserDto>>)> {
    require_admin(&user)?;
    let created = state.admin_service.create_staff(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(created), None, None)),
    ))
}

/// Get all users (paginated)
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "admin",
    params(PaginationQuery, AdminUserQuery),
    responses(
        (status = 200, description = "Paginated list of users", body = ApiResponse<AdminUserListDto>),
        (status = 403, description = "Administrator privileges required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    user: CurrentUser,
    State(state): State<AdminState>,
    Query(pagination): Query<PaginationQuery>,
    Query(query): Query<AdminUserQuery>,
) -> Result<Json<ApiResponse<AdminUserListDto>>> {
    require_admin(&user)?;
    let list = state.admin_service.list_users(&query, &pagination).await?;
    Ok(Json(ApiResponse::success(Some(list), None, None)))
}

/// Get user details
#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = ApiResponse<AdminUserDto>),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    user: CurrentUser,
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<AdminUserDto>>> {
    require_admin(&user)?;
    let found = state.admin_service.get_user(id).await?;
    Ok(Json(ApiResponse::success(Some(found), None, None)))
}

/// Update user role, status, or locality
#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<AdminUserDto>),
        (status = 400, description = "Cannot change your own role"),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    user: CurrentUser,
    State(state): State<AdminState>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateUserDto>,
) -> Result<Json<ApiResponse<AdminUserDto>>> {
    require_admin(&user)?;
    let updated = state.admin_service.update_user(user.id, id, dto).await?;
    Ok(Json(ApiResponse::success(Some(updated), None, None)))
}

/// Deactivate a user (soft delete)
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deactivated"),
        (status = 400, description = "Cannot deactivate yourself"),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn deactivate_user(
    user: CurrentUser,
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    require_admin(&user)?;
    state.admin_service.deactivate_user(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================== Issue Management ====================

/// Delete an issue and all its photos
#[utoipa::path(
    delete,
    path = "/api/admin/reports/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "Issue ID")),
    responses(
        (status = 204, description = "Issue and its photos deleted"),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "Issue not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_issue(
    user: CurrentUser,
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    require_admin(&user)?;
    state.issue_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
