use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::localities::models::LocalityType;
use crate::features::users::models::UserRole;
use crate::shared::validation::MOBILE_NUMBER_REGEX;

/// Request to create a new locality (ward/village)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLocalityDto {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    /// Type of locality (ward or village)
    #[serde(rename = "type")]
    pub locality_type: LocalityType,
}

/// Request to update a locality
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateLocalityDto {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

/// Admin view of a locality, with usage counts
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminLocalityDto {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub locality_type: LocalityType,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub representative_count: i64,
    pub issue_count: i64,
}

/// Paginated list of localities
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminLocalityListDto {
    pub items: Vec<AdminLocalityDto>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

/// Filters for the admin locality listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AdminLocalityQuery {
    /// Filter by type
    #[serde(rename = "type")]
    pub locality_type: Option<LocalityType>,
    /// Filter by active status
    pub is_active: Option<bool>,
    /// Search by name
    pub search: Option<String>,
}

/// Request to create a staff user (representative, PWD worker, or admin).
/// Citizens register themselves; they cannot be created here.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStaffDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Mobile number with country code (e.g., +919876543210)
    #[validate(regex(
        path = *MOBILE_NUMBER_REGEX,
        message = "Mobile number must be 10-15 digits, optionally prefixed with +"
    ))]
    pub mobile_number: String,

    /// User role (representative, pwd_worker, admin)
    pub role: UserRole,

    /// Locality ID (required for representatives)
    pub locality_id: Option<i64>,
}

/// Request to update a user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    pub locality_id: Option<i64>,
}

/// Admin view of a user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminUserDto {
    pub id: i64,
    pub name: String,
    pub mobile_number: String,
    pub role: UserRole,
    pub is_active: bool,
    pub is_verified: bool,
    pub locality_id: Option<i64>,
    pub locality_name: Option<String>,
    pub locality_type: Option<LocalityType>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub total_reports: i64,
    pub assigned_issues: i64,
}

/// Paginated list of users
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminUserListDto {
    pub items: Vec<AdminUserDto>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

/// Filters for the admin user listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AdminUserQuery {
    /// Filter by role
    pub role: Option<UserRole>,
    /// Filter by locality
    pub locality_id: Option<i64>,
    /// Filter by active status
    pub is_active: Option<bool>,
    /// Search by name or mobile number
    pub search: Option<String>,
}
