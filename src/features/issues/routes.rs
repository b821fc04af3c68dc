use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::features::issues::handlers::{
    create_issue, get_issue, list_my_issues, map_issues, update_issue_status,
};
use crate::features::issues::services::IssueService;

/// Routes that require authentication
pub fn protected_routes(issue_service: Arc<IssueService>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/api/reports", post(create_issue).get(list_my_issues))
        .route("/api/reports/{id}", get(get_issue))
        .route("/api/reports/{id}/status", patch(update_issue_status))
        // Allow body size up to the photo budget + buffer for multipart overhead
        .layer(DefaultBodyLimit::max(max_body_bytes + 1024 * 1024))
        .with_state(issue_service)
}

/// Public routes (map view needs no authentication)
pub fn public_routes(issue_service: Arc<IssueService>) -> Router {
    Router::new()
        .route("/api/reports/map", get(map_issues))
        .with_state(issue_service)
}
