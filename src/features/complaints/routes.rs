use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::complaints::handlers;
use crate::features::complaints::services::ComplaintService;

/// Create routes for the complaints feature
///
/// Note: This feature requires authentication; role checks happen per handler
pub fn routes(service: Arc<ComplaintService>) -> Router {
    Router::new()
        .route(
            "/api/complaints",
            get(handlers::list_complaints).post(handlers::create_complaint),
        )
        .route("/api/complaints/my", get(handlers::list_my_complaints))
        .route(
            "/api/complaints/{id}/status",
            patch(handlers::update_complaint_status),
        )
        .route(
            "/api/faculty/complaints",
            get(handlers::list_assigned_complaints),
        )
        .route(
            "/api/faculty/complaints/{id}/status",
            patch(handlers::update_assigned_complaint_status),
        )
        .with_state(service)
}
