use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::issues::{
    dtos as issues_dtos, handlers as issues_handlers, models as issues_models,
};
use crate::features::localities::{
    dtos as localities_dtos, handlers as localities_handlers, models as localities_models,
};
use crate::features::users::models as users_models;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports
        issues_handlers::create_issue,
        issues_handlers::list_my_issues,
        issues_handlers::map_issues,
        issues_handlers::get_issue,
        issues_handlers::update_issue_status,
        // Localities (public)
        localities_handlers::list_localities,
        localities_handlers::get_locality,
        // Admin
        admin_handlers::create_locality,
        admin_handlers::list_localities,
        admin_handlers::get_locality,
        admin_handlers::update_locality,
        admin_handlers::delete_locality,
        admin_handlers::create_staff,
        admin_handlers::list_users,
        admin_handlers::get_user,
        admin_handlers::update_user,
        admin_handlers::deactivate_user,
        admin_handlers::delete_issue,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Enums
            issues_models::IssueType,
            issues_models::IssueStatus,
            localities_models::LocalityType,
            users_models::UserRole,
            // Reports
            issues_dtos::CreateIssueForm,
            issues_dtos::UpdateIssueStatusForm,
            issues_dtos::IssuePhotoDto,
            issues_dtos::IssueResponseDto,
            issues_dtos::IssueListDto,
            issues_dtos::IssueMapDto,
            ApiResponse<issues_dtos::IssueResponseDto>,
            ApiResponse<issues_dtos::IssueListDto>,
            ApiResponse<Vec<issues_dtos::IssueMapDto>>,
            // Localities
            localities_dtos::RepresentativeInfoDto,
            localities_dtos::LocalityDirectoryDto,
            localities_dtos::LocalityDirectoryListDto,
            ApiResponse<localities_dtos::LocalityDirectoryDto>,
            ApiResponse<localities_dtos::LocalityDirectoryListDto>,
            // Admin
            admin_dtos::CreateLocalityDto,
            admin_dtos::UpdateLocalityDto,
            admin_dtos::AdminLocalityDto,
            admin_dtos::AdminLocalityListDto,
            admin_dtos::CreateStaffDto,
            admin_dtos::UpdateUserDto,
            admin_dtos::AdminUserDto,
            admin_dtos::AdminUserListDto,
            ApiResponse<admin_dtos::AdminLocalityDto>,
            ApiResponse<admin_dtos::AdminLocalityListDto>,
            ApiResponse<admin_dtos::AdminUserDto>,
            ApiResponse<admin_dtos::AdminUserListDto>,
        )
    ),
    tags(
        (name = "reports", description = "Citizen issue reports and lifecycle transitions"),
        (name = "localities", description = "Public locality directory (wards and villages)"),
        (name = "admin", description = "Locality and staff management (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "JanSarthi API",
        version = "0.1.0",
        description = "API documentation for JanSarthi",
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
