use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::provinces::handlers;
use crate::features::provinces::services::ProvinceService;

/// Create routes for the provinces feature
pub fn routes(service: Arc<ProvinceService>) -> Router {
    Router::new()
        .route("/api/v1/provinces", get(handlers::list_provinces))
        .route("/api/v1/provinces/{id}", get(handlers::get_province))
        .with_state(service)
}
