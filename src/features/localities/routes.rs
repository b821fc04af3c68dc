use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::localities::handlers::{get_locality, list_localities};
use crate::features::localities::services::LocalityService;

/// Create public routes for the locality directory
pub fn routes(locality_service: Arc<LocalityService>) -> Router {
    Router::new()
        .route("/api/reports/localities/all", get(list_localities))
        .route("/api/reports/localities/{id}", get(get_locality))
        .with_state(locality_service)
}
