use std::sync::Arc;

use axum::{
    routing::{delete, get, put},
    Router,
};

use crate::features::faculty::handlers::{self, FacultyState};
use crate::features::faculty::services::{FacultyLifecycleGuard, FacultyService};

/// Create faculty administration routes (all require admin access)
pub fn routes(
    faculty_service: Arc<FacultyService>,
    lifecycle_guard: Arc<FacultyLifecycleGuard>,
) -> Router {
    let state = FacultyState {
        faculty_service,
        lifecycle_guard,
    };

    Router::new()
        .route(
            "/api/admin/faculty",
            get(handlers::list_faculty).post(handlers::create_faculty),
        )
        .route("/api/admin/faculty/{id}", delete(handlers::delete_faculty))
        .route(
            "/api/admin/faculty/{from_id}/reassign/{to_id}",
            put(handlers::reassign_faculty),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use super::*;
    use crate::features::assignment::services::WorkloadCalculator;
    use crate::features::auth::model::AuthenticatedUser;
    use crate::features::complaints::models::ComplaintStatus;
    use crate::features::faculty::models::UserRole;
    use crate::shared::test_helpers::{fake_email, with_identity, MemoryStore};

    fn server(store: &MemoryStore, user: AuthenticatedUser) -> TestServer {
        let service = FacultyService::new(
            store.directory(),
            WorkloadCalculator::new(store.complaints()),
        );
        let guard = FacultyLifecycleGuard::new(store.complaints(), store.directory());
        let router = routes(Arc::new(service), Arc::new(guard));
        TestServer::new(with_identity(router, user)).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_list_faculty() {
        let store = MemoryStore::new();
        let admin = store.add_admin().await;
        let server = server(&store, AuthenticatedUser::new(admin.id, UserRole::Admin));

        server
            .post("/api/admin/faculty")
            .json(&json!({
                "name": "Dr. Rao",
                "email": fake_email(),
                "department": "Food Services"
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.get("/api/admin/faculty").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"][0]["name"], "Dr. Rao");
        assert_eq!(body["data"][0]["workload"], 0);
    }

    #[tokio::test]
    async fn test_invalid_email_is_rejected() {
        let store = MemoryStore::new();
        let admin = store.add_admin().await;
        let server = server(&store, AuthenticatedUser::new(admin.id, UserRole::Admin));

        server
            .post("/api/admin/faculty")
            .json(&json!({
                "name": "Dr. Rao",
                "email": "not-an-email",
                "department": "IT"
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_with_pending_work_conflicts() {
        let store = MemoryStore::new();
        let admin = store.add_admin().await;
        let faculty = store.add_faculty("Dr. Rao", Some("IT")).await;
        let student = store.add_student().await;
        store
            .add_complaint(student.id, "IT Services", Some(faculty.id), ComplaintStatus::Submitted)
            .await;
        let server = server(&store, AuthenticatedUser::new(admin.id, UserRole::Admin));

        let response = server
            .delete(&format!("/api/admin/faculty/{}", faculty.id))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["message"]
            .as_str()
            .is_some_and(|m| m.contains("1 complaints")));
    }

    #[tokio::test]
    async fn test_reassign_reports_moved_count() {
        let store = MemoryStore::new();
        let admin = store.add_admin().await;
        let from = store.add_faculty("From", Some("IT")).await;
        let to = store.add_faculty("To", Some("IT")).await;
        let student = store.add_student().await;
        store
            .add_complaint(student.id, "IT Services", Some(from.id), ComplaintStatus::InProgress)
            .await;
        store
            .add_complaint(student.id, "IT Services", Some(from.id), ComplaintStatus::Resolved)
            .await;
        let server = server(&store, AuthenticatedUser::new(admin.id, UserRole::Admin));

        let response = server
            .put(&format!("/api/admin/faculty/{}/reassign/{}", from.id, to.id))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["moved"], 1);
    }

    #[tokio::test]
    async fn test_student_cannot_manage_faculty() {
        let store = MemoryStore::new();
        let student = store.add_student().await;
        let server = server(&store, AuthenticatedUser::new(student.id, UserRole::Student));

        server
            .get("/api/admin/faculty")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
