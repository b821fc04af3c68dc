use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::features::admin::handlers::{self, AdminState};
use crate::features::admin::services::AdminService;
use crate::features::issues::services::IssueService;

/// Create routes for the admin feature.
/// The caller applies the auth middleware; handlers enforce the admin role.
pub fn routes(admin_service: Arc<AdminService>, issue_service: Arc<IssueService>) -> Router {
    let state = AdminState {
        admin_service,
        issue_service,
    };

    Router::new()
        .route(
            "/api/admin/localities",
            post(handlers::create_locality).get(handlers::list_localities),
        )
        .route(
            "/api/admin/localities/{id}",
            get(handlers::get_locality)
                .patch(handlers::update_locality)
                .delete(handlers::delete_locality),
        )
        .route(
            "/api/admin/users",
            post(handlers::create_staff).get(handlers::list_users),
        )
        .route(
            "/api/admin/users/{id}",
            get(handlers::get_user)
                .patch(handlers::update_user)
                .delete(handlers::deactivate_user),
        )
        .route("/api/admin/reports/{id}", delete(handlers::delete_issue))
        .with_state(state)
}
