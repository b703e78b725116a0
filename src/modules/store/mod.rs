//! Persistence contracts consumed by the complaint and faculty services.
//!
//! The store is assumed to offer atomic writes per complaint but no
//! transactions spanning several complaints, so bulk operations report an
//! affected count instead of promising all-or-nothing semantics.

mod postgres;

pub use postgres::{PgComplaintStore, PgUserDirectory};

use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::complaints::models::{AuditNote, Complaint, ComplaintStatus, NewComplaint};
use crate::features::faculty::models::{FacultyProfile, NewUser, User};

/// Conjunctive complaint filter. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintFilter {
    pub assignee_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub statuses: Option<Vec<ComplaintStatus>>,
}

impl ComplaintFilter {
    pub fn assigned_to(faculty_id: Uuid) -> Self {
        Self {
            assignee_id: Some(faculty_id),
            ..Self::default()
        }
    }

    pub fn created_by(user_id: Uuid) -> Self {
        Self {
            created_by: Some(user_id),
            ..Self::default()
        }
    }

    pub fn with_statuses(mut self, statuses: &[ComplaintStatus]) -> Self {
        self.statuses = Some(statuses.to_vec());
        self
    }

    /// Restrict to pending work (submitted or in progress)
    pub fn active(self) -> Self {
        self.with_statuses(&ComplaintStatus::ACTIVE)
    }
}

/// In-memory evaluation, used by the test store
#[cfg(test)]
impl ComplaintFilter {
    pub fn matches(&self, complaint: &Complaint) -> bool {
        self.assignee_id
            .map_or(true, |id| complaint.assignee_id == Some(id))
            && self
                .created_by
                .map_or(true, |id| complaint.created_by == id)
            && self
                .statuses
                .as_ref()
                .map_or(true, |s| s.contains(&complaint.status))
    }
}

/// Condition the store re-checks at write time, atomically with the write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePrecondition {
    Any,
    Unassigned,
    AssignedTo(Uuid),
}

#[cfg(test)]
impl WritePrecondition {
    pub fn holds(&self, complaint: &Complaint) -> bool {
        match self {
            WritePrecondition::Any => true,
            WritePrecondition::Unassigned => complaint.assignee_id.is_none(),
            WritePrecondition::AssignedTo(id) => complaint.assignee_id == Some(*id),
        }
    }
}

/// Single-complaint write: optional new assignee, optional new status, optional note
#[derive(Debug, Clone)]
pub struct ComplaintUpdate {
    pub precondition: WritePrecondition,
    pub assignee_id: Option<Uuid>,
    pub status: Option<ComplaintStatus>,
    pub note: Option<AuditNote>,
}

impl ComplaintUpdate {
    pub fn new(precondition: WritePrecondition) -> Self {
        Self {
            precondition,
            assignee_id: None,
            status: None,
            note: None,
        }
    }

    pub fn assign(mut self, faculty_id: Uuid) -> Self {
        self.assignee_id = Some(faculty_id);
        self
    }

    pub fn status(mut self, status: Option<ComplaintStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn note(mut self, note: AuditNote) -> Self {
        self.note = Some(note);
        self
    }
}

#[cfg(test)]
impl ComplaintUpdate {
    /// Apply the change to an in-memory complaint. The precondition is not checked here.
    pub fn apply_to(&self, complaint: &mut Complaint) {
        if let Some(assignee_id) = self.assignee_id {
            complaint.assignee_id = Some(assignee_id);
        }
        if let Some(status) = self.status {
            complaint.status = status;
        }
        if let Some(note) = &self.note {
            complaint.notes.append(note.clone());
        }
        complaint.updated_at = chrono::Utc::now();
    }
}

#[derive(Debug, Clone)]
pub enum WriteOutcome {
    Applied(Complaint),
    /// The complaint exists but the precondition no longer held; carries its current state
    Rejected(Complaint),
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacultyRemoval {
    Removed { unassigned: u64 },
    Blocked { pending: i64 },
}

#[async_trait]
pub trait ComplaintStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Complaint>>;

    async fn create(&self, data: NewComplaint) -> Result<Complaint>;

    /// Matching complaints, newest first
    async fn find(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>>;

    /// Active complaint counts for several assignees in one grouped query.
    /// Assignees without active complaints may be absent from the map.
    async fn count_active_by_assignee(&self, assignee_ids: &[Uuid]) -> Result<HashMap<Uuid, i64>>;

    async fn update(&self, id: Uuid, update: ComplaintUpdate) -> Result<WriteOutcome>;

    /// Set the assignee of every matching complaint; returns how many were changed
    async fn set_assignee_where(
        &self,
        filter: &ComplaintFilter,
        assignee_id: Option<Uuid>,
    ) -> Result<u64>;
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Faculty accounts in creation order
    async fn list_faculty(&self) -> Result<Vec<FacultyProfile>>;

    async fn create(&self, data: NewUser) -> Result<User>;

    /// Delete a faculty account if it has no pending work, unassigning its
    /// remaining (resolved) complaints first. Check and delete form one write.
    async fn remove_faculty_if_idle(&self, id: Uuid) -> Result<FacultyRemoval>;
}
