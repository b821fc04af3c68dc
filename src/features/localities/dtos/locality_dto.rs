use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::localities::models::LocalityType;

/// Representative info for the public directory
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RepresentativeInfoDto {
    pub id: i64,
    pub name: String,
}

/// Public locality entry with its active representatives
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocalityDirectoryDto {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub locality_type: LocalityType,
    pub representatives: Vec<RepresentativeInfoDto>,
}

/// Public locality directory listing
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LocalityDirectoryListDto {
    pub items: Vec<LocalityDirectoryDto>,
    pub total: i64,
}

/// Query parameters for the public locality directory
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct LocalityDirectoryQuery {
    /// Filter by locality type (ward or village)
    #[serde(rename = "type")]
    pub locality_type: Option<LocalityType>,
    /// Search by locality name
    pub search: Option<String>,
}
