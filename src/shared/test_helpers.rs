//! In-memory store and request helpers for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{extract::Request, middleware::Next, Router};
use chrono::Utc;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::complaints::models::{
    AuditTrail, Complaint, ComplaintPriority, ComplaintStatus, NewComplaint,
};
use crate::features::faculty::models::{FacultyProfile, NewUser, User, UserRole};
use crate::modules::store::{
    ComplaintFilter, ComplaintStore, ComplaintUpdate, FacultyRemoval, UserDirectory,
    WriteOutcome,
};

pub fn fake_name() -> String {
    Name().fake()
}

/// Random e-mail, prefixed so repeated calls never collide
pub fn fake_email() -> String {
    let email: String = SafeEmail().fake();
    format!("{}.{}", &Uuid::new_v4().simple().to_string()[..8], email)
}

#[derive(Default)]
struct State {
    // Vec keeps creation order
    users: Vec<User>,
    complaints: Vec<Complaint>,
}

/// Both store traits over one shared in-memory state
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
    workload_queries: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn complaints(&self) -> Arc<dyn ComplaintStore> {
        Arc::new(self.clone())
    }

    pub fn directory(&self) -> Arc<dyn UserDirectory> {
        Arc::new(self.clone())
    }

    /// Number of workload count queries served so far
    pub fn workload_queries(&self) -> usize {
        self.workload_queries.load(Ordering::SeqCst)
    }

    async fn add_user(&self, name: &str, role: UserRole, department: Option<&str>) -> User {
        let user = User {
            id: Uuid::now_v7(),
            name: name.to_string(),
            email: fake_email(),
            role,
            department: department.map(String::from),
            created_at: Utc::now(),
        };
        self.state.lock().await.users.push(user.clone());
        user
    }

    pub async fn add_faculty(&self, name: &str, department: Option<&str>) -> User {
        self.add_user(name, UserRole::Faculty, department).await
    }

    pub async fn add_student(&self) -> User {
        self.add_user(&fake_name(), UserRole::Student, None).await
    }

    pub async fn add_admin(&self) -> User {
        self.add_user(&fake_name(), UserRole::Admin, None).await
    }

    pub async fn add_complaint(
        &self,
        created_by: Uuid,
        category: &str,
        assignee_id: Option<Uuid>,
        status: ComplaintStatus,
    ) -> Complaint {
        let now = Utc::now();
        let complaint = Complaint {
            id: Uuid::now_v7(),
            title: format!("{} issue", category),
            description: "Reported during testing".to_string(),
            category: category.to_string(),
            status,
            priority: ComplaintPriority::Medium,
            anonymous: false,
            created_by,
            assignee_id,
            attachments: Vec::new(),
            notes: AuditTrail::default(),
            created_at: now,
            updated_at: now,
        };
        self.state.lock().await.complaints.push(complaint.clone());
        complaint
    }

    pub async fn set_priority(&self, id: Uuid, priority: ComplaintPriority) {
        let mut state = self.state.lock().await;
        if let Some(c) = state.complaints.iter_mut().find(|c| c.id == id) {
            c.priority = priority;
        }
    }

    /// Current state of a complaint; panics if it does not exist
    pub async fn snapshot(&self, id: Uuid) -> Complaint {
        self.state
            .lock()
            .await
            .complaints
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .expect("complaint exists")
    }

    pub async fn user_exists(&self, id: Uuid) -> bool {
        self.state.lock().await.users.iter().any(|u| u.id == id)
    }
}

#[async_trait]
impl ComplaintStore for MemoryStore {
    async fn get(&self, id: Uuid) -> Result<Option<Complaint>> {
        let state = self.state.lock().await;
        Ok(state.complaints.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, data: NewComplaint) -> Result<Complaint> {
        let now = Utc::now();
        let complaint = Complaint {
            id: Uuid::now_v7(),
            title: data.title,
            description: data.description,
            category: data.category,
            status: ComplaintStatus::Submitted,
            priority: data.priority,
            anonymous: data.anonymous,
            created_by: data.created_by,
            assignee_id: None,
            attachments: data.attachments,
            notes: AuditTrail::default(),
            created_at: now,
            updated_at: now,
        };
        self.state.lock().await.complaints.push(complaint.clone());
        Ok(complaint)
    }

    async fn find(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>> {
        let state = self.state.lock().await;
        Ok(state
            .complaints
            .iter()
            .rev()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    async fn count_active_by_assignee(&self, assignee_ids: &[Uuid]) -> Result<HashMap<Uuid, i64>> {
        self.workload_queries.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().await;

        let mut counts = HashMap::new();
        for c in state.complaints.iter().filter(|c| ComplaintStatus::ACTIVE.contains(&c.status)) {
            if let Some(id) = c.assignee_id.filter(|id| assignee_ids.contains(id)) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    async fn update(&self, id: Uuid, update: ComplaintUpdate) -> Result<WriteOutcome> {
        let mut state = self.state.lock().await;
        let Some(complaint) = state.complaints.iter_mut().find(|c| c.id == id) else {
            return Ok(WriteOutcome::Missing);
        };

        if !update.precondition.holds(complaint) {
            return Ok(WriteOutcome::Rejected(complaint.clone()));
        }

        update.apply_to(complaint);
        Ok(WriteOutcome::Applied(complaint.clone()))
    }

    async fn set_assignee_where(
        &self,
        filter: &ComplaintFilter,
        assignee_id: Option<Uuid>,
    ) -> Result<u64> {
        let mut state = self.state.lock().await;
        let mut changed = 0;
        for c in state.complaints.iter_mut().filter(|c| filter.matches(c)) {
            c.assignee_id = assignee_id;
            c.updated_at = Utc::now();
            changed += 1;
        }
        Ok(changed)
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn get(&self, id: Uuid) -> Result<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_faculty(&self) -> Result<Vec<FacultyProfile>> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .iter()
            .filter(|u| u.is_faculty())
            .cloned()
            .map(FacultyProfile::from)
            .collect())
    }

    async fn create(&self, data: NewUser) -> Result<User> {
        let mut state = self.state.lock().await;
        if state.users.iter().any(|u| u.email == data.email) {
            return Err(AppError::Conflict(format!(
                "An account with email {} already exists",
                data.email
            )));
        }

        let user = User {
            id: Uuid::now_v7(),
            name: data.name,
            email: data.email,
            role: data.role,
            department: data.department,
            created_at: Utc::now(),
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn remove_faculty_if_idle(&self, id: Uuid) -> Result<FacultyRemoval> {
        let mut state = self.state.lock().await;
        if !state.users.iter().any(|u| u.id == id && u.is_faculty()) {
            return Err(AppError::NotFound(format!("Faculty {} not found", id)));
        }

        let assigned = ComplaintFilter::assigned_to(id);
        let pending = state
            .complaints
            .iter()
            .filter(|c| assigned.matches(c) && ComplaintStatus::ACTIVE.contains(&c.status))
            .count() as i64;
        if pending > 0 {
            return Ok(FacultyRemoval::Blocked { pending });
        }

        let mut unassigned = 0;
        for c in state.complaints.iter_mut().filter(|c| assigned.matches(c)) {
            c.assignee_id = None;
            unassigned += 1;
        }
        state.users.retain(|u| u.id != id);

        Ok(FacultyRemoval::Removed { unassigned })
    }
}

/// Layer that inserts `user` as the authenticated principal on every request
pub fn with_identity(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| async move {
            request.extensions_mut().insert(user);
            next.run(request).await
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::store::WritePrecondition;

    #[tokio::test]
    async fn test_find_returns_newest_first() {
        let store = MemoryStore::new();
        let student = store.add_student().await;
        let first = store
            .add_complaint(student.id, "Academic", None, ComplaintStatus::Submitted)
            .await;
        let second = store
            .add_complaint(student.id, "Academic", None, ComplaintStatus::Submitted)
            .await;

        let found = store
            .complaints()
            .find(&ComplaintFilter::created_by(student.id))
            .await
            .unwrap();

        let ids: Vec<Uuid> = found.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_conditional_update_is_rejected_when_precondition_fails() {
        let store = MemoryStore::new();
        let faculty = store.add_faculty("Dr. Vo", None).await;
        let student = store.add_student().await;
        let complaint = store
            .add_complaint(student.id, "Others", Some(faculty.id), ComplaintStatus::Submitted)
            .await;

        let outcome = store
            .complaints()
            .update(
                complaint.id,
                ComplaintUpdate::new(WritePrecondition::Unassigned)
                    .status(Some(ComplaintStatus::Resolved)),
            )
            .await
            .unwrap();

        assert!(matches!(outcome, WriteOutcome::Rejected(ref c) if c.status == ComplaintStatus::Submitted));
        assert_eq!(
            store.snapshot(complaint.id).await.status,
            ComplaintStatus::Submitted
        );
    }
}
