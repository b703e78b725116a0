use std::sync::Arc;

use axum::{
    routing::{post, put},
    Router,
};

use crate::features::assignment::handlers;
use crate::features::assignment::services::AssignmentService;

/// Create routes for the assignment feature (admin only)
pub fn routes(service: Arc<AssignmentService>) -> Router {
    Router::new()
        .route(
            "/api/assignment/recommend",
            post(handlers::recommend_faculty),
        )
        .route("/api/assignment/auto-assign", post(handlers::auto_assign))
        .route("/api/complaints/{id}/assign", put(handlers::manual_assign))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use super::*;
    use crate::features::assignment::services::{FacultySelector, WorkloadCalculator};
    use crate::features::auth::model::AuthenticatedUser;
    use crate::features::complaints::models::{ComplaintPriority, ComplaintStatus};
    use crate::features::faculty::models::UserRole;
    use crate::shared::test_helpers::{with_identity, MemoryStore};

    fn server(store: &MemoryStore, user: AuthenticatedUser) -> TestServer {
        let complaints = store.complaints();
        let selector = FacultySelector::new(WorkloadCalculator::new(complaints.clone()));
        let service = AssignmentService::new(complaints, store.directory(), selector);
        TestServer::new(with_identity(routes(Arc::new(service)), user)).unwrap()
    }

    #[tokio::test]
    async fn test_recommend_returns_suggestion() {
        let store = MemoryStore::new();
        let admin = store.add_admin().await;
        let a = store.add_faculty("A", Some("IT")).await;
        let b = store.add_faculty("B", Some("IT")).await;
        let student = store.add_student().await;
        for _ in 0..2 {
            store
                .add_complaint(student.id, "IT Services", Some(a.id), ComplaintStatus::Submitted)
                .await;
        }
        let complaint = store
            .add_complaint(student.id, "IT Services", None, ComplaintStatus::Submitted)
            .await;
        let server = server(&store, AuthenticatedUser::new(admin.id, UserRole::Admin));

        let response = server
            .post("/api/assignment/recommend")
            .json(&json!({ "complaint_id": complaint.id }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["faculty_id"], b.id.to_string());
        assert_eq!(body["data"]["workload"], 0);
        assert_eq!(body["data"]["confidence"], 0.9);
        assert_eq!(body["data"]["department"], "IT");
    }

    #[tokio::test]
    async fn test_auto_assign_twice_conflicts() {
        let store = MemoryStore::new();
        let admin = store.add_admin().await;
        store.add_faculty("Dr. Cho", Some("Academic")).await;
        let student = store.add_student().await;
        let complaint = store
            .add_complaint(student.id, "Academic", None, ComplaintStatus::Submitted)
            .await;
        store.set_priority(complaint.id, ComplaintPriority::High).await;
        let server = server(&store, AuthenticatedUser::new(admin.id, UserRole::Admin));

        let first = server
            .post("/api/assignment/auto-assign")
            .json(&json!({ "complaint_id": complaint.id }))
            .await;
        first.assert_status_ok();
        let body: Value = first.json();
        assert_eq!(body["data"]["complaint"]["status"], "in-progress");
        assert_eq!(body["data"]["assigned_to"]["name"], "Dr. Cho");

        server
            .post("/api/assignment/auto-assign")
            .json(&json!({ "complaint_id": complaint.id }))
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_manual_assign_to_student_is_bad_request() {
        let store = MemoryStore::new();
        let admin = store.add_admin().await;
        let student = store.add_student().await;
        let complaint = store
            .add_complaint(student.id, "Others", None, ComplaintStatus::Submitted)
            .await;
        let server = server(&store, AuthenticatedUser::new(admin.id, UserRole::Admin));

        server
            .put(&format!("/api/complaints/{}/assign", complaint.id))
            .json(&json!({ "faculty_id": student.id }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_admin_cannot_auto_assign() {
        let store = MemoryStore::new();
        let faculty = store.add_faculty("Dr. Cho", Some("Academic")).await;
        let student = store.add_student().await;
        let complaint = store
            .add_complaint(student.id, "Academic", None, ComplaintStatus::Submitted)
            .await;
        let server = server(&store, AuthenticatedUser::new(faculty.id, UserRole::Faculty));

        server
            .post("/api/assignment/auto-assign")
            .json(&json!({ "complaint_id": complaint.id }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
        assert_eq!(store.snapshot(complaint.id).await.assignee_id, None);
    }

    #[tokio::test]
    async fn test_recommend_without_faculty_is_not_found() {
        let store = MemoryStore::new();
        let admin = store.add_admin().await;
        let student = store.add_student().await;
        let complaint = store
            .add_complaint(student.id, "Academic", None, ComplaintStatus::Submitted)
            .await;
        let server = server(&store, AuthenticatedUser::new(admin.id, UserRole::Admin));

        server
            .post("/api/assignment/recommend")
            .json(&json!({ "complaint_id": complaint.id }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
