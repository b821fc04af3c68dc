use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::issues::models::{IssueStatus, IssueType};
use crate::features::localities::models::LocalityType;

/// Validated fields of a new issue report (parsed out of the multipart form)
#[derive(Debug, Clone, Validate)]
pub struct CreateIssueDto {
    pub issue_type: IssueType,

    #[validate(length(min = 10, max = 2000, message = "Description must be 10-2000 characters"))]
    pub description: String,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: f64,

    pub locality_id: Option<i64>,
}

/// Create issue request for OpenAPI documentation.
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreateIssueForm {
    /// Type of issue (water, electricity, road, garbage)
    #[schema(example = "water")]
    pub issue_type: String,
    /// Detailed description of the issue
    pub description: String,
    /// Location latitude
    pub latitude: f64,
    /// Location longitude
    pub longitude: f64,
    /// Locality ID (ward or village)
    pub locality_id: Option<i64>,
    /// Up to the configured number of photos of the issue
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub photos: Option<Vec<String>>,
}

/// Status transition request for OpenAPI documentation.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UpdateIssueStatusForm {
    /// Target status (must be the immediate successor of the current one)
    #[schema(example = "pwd_working")]
    pub status: String,
    /// Progress notes from the representative
    pub progress_notes: Option<String>,
    /// Required when moving to pwd_completed
    pub completion_description: Option<String>,
    /// Optional photo of the finished work (pwd_completed only)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub completion_photo: Option<String>,
}

/// Photo attached to an issue, with a time-limited download URL
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssuePhotoDto {
    pub id: i64,
    /// Presigned URL; expires after the configured interval
    pub photo_url: String,
    pub filename: String,
    pub file_size: i64,
    pub content_type: String,
    pub created_at: DateTime<Utc>,
}

/// Full issue response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssueResponseDto {
    pub id: i64,
    pub issue_type: IssueType,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub locality_id: Option<i64>,
    pub locality_name: Option<String>,
    pub locality_type: Option<LocalityType>,
    pub status: IssueStatus,
    pub reporter_id: Option<i64>,
    pub assigned_parshad_id: Option<i64>,
    /// Human-readable outcome of auto-assignment (creation responses only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_message: Option<String>,
    pub progress_notes: Option<String>,
    pub completion_description: Option<String>,
    /// Presigned URL of the completion photo, if one was attached
    pub completion_photo_url: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub completed_by_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub photos: Vec<IssuePhotoDto>,
}

/// Paginated issue listing
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IssueListDto {
    pub items: Vec<IssueResponseDto>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

/// Equality filters shared by the listing and map endpoints
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct IssueFilterQuery {
    /// Filter by issue type
    pub issue_type: Option<IssueType>,
    /// Filter by lifecycle status
    pub status: Option<IssueStatus>,
}

/// Query parameters for the map view
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct MapQuery {
    /// Center point latitude
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,

    /// Center point longitude
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: f64,

    /// Search radius in kilometers (default: 10km, max: 100km)
    #[serde(default = "default_radius_km")]
    #[validate(range(min = 0.1, max = 100.0, message = "Radius must be 0.1-100 km"))]
    pub radius: f64,

    /// Filter by issue type
    pub issue_type: Option<IssueType>,
    /// Filter by lifecycle status
    pub status: Option<IssueStatus>,
}

fn default_radius_km() -> f64 {
    10.0
}

/// Minimal issue summary for map-pin rendering
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssueMapDto {
    pub id: i64,
    pub issue_type: IssueType,
    pub latitude: f64,
    pub longitude: f64,
    pub status: IssueStatus,
}
