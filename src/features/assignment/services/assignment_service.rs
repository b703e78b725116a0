use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::selector::FacultySelector;
use crate::core::error::{AppError, Result};
use crate::features::assignment::dtos::Suggestion;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::complaints::models::{
    AuditNote, Complaint, ComplaintPriority, ComplaintStatus,
};
use crate::features::faculty::models::FacultyProfile;
use crate::modules::store::{
    ComplaintStore, ComplaintUpdate, UserDirectory, WriteOutcome, WritePrecondition,
};

/// What an assignment decided, together with the complaint as persisted
#[derive(Debug, Clone)]
pub struct AssignmentOutcome {
    pub complaint: Complaint,
    pub assignee: FacultyProfile,
    pub suggestion: Option<Suggestion>,
}

/// Applies faculty assignments to complaints, manually or from the selector's recommendation
pub struct AssignmentService {
    complaints: Arc<dyn ComplaintStore>,
    directory: Arc<dyn UserDirectory>,
    selector: FacultySelector,
}

impl AssignmentService {
    pub fn new(
        complaints: Arc<dyn ComplaintStore>,
        directory: Arc<dyn UserDirectory>,
        selector: FacultySelector,
    ) -> Self {
        Self {
            complaints,
            directory,
            selector,
        }
    }

    async fn load_complaint(&self, id: Uuid) -> Result<Complaint> {
        self.complaints
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Complaint {} not found", id)))
    }

    /// Recommend a faculty member without changing anything
    pub async fn recommend(&self, complaint_id: Uuid) -> Result<Suggestion> {
        let complaint = self.load_complaint(complaint_id).await?;
        let pool = self.directory.list_faculty().await?;

        self.selector.recommend(&complaint, &pool).await
    }

    /// Assign an unassigned complaint to the recommended faculty member.
    ///
    /// High priority complaints are escalated to in-progress; others keep their status.
    /// The unassigned check is repeated by the store at write time.
    pub async fn auto_assign(
        &self,
        complaint_id: Uuid,
        actor: &AuthenticatedUser,
    ) -> Result<AssignmentOutcome> {
        let complaint = self.load_complaint(complaint_id).await?;
        if let Some(assignee_id) = complaint.assignee_id {
            return Err(AppError::AlreadyAssigned {
                complaint_id,
                assignee_id,
            });
        }

        let pool = self.directory.list_faculty().await?;
        let suggestion = self.selector.recommend(&complaint, &pool).await?;

        let assignee = pool
            .iter()
            .find(|f| f.id == suggestion.faculty_id)
            .cloned()
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Selected faculty {} is not in the faculty pool",
                    suggestion.faculty_id
                ))
            })?;

        let escalated = (complaint.priority == ComplaintPriority::High)
            .then_some(ComplaintStatus::InProgress);

        let note = AuditNote {
            message: format!(
                "Assigned automatically to {}. Reason: {}",
                assignee.name, suggestion.reason
            ),
            author_id: actor.user_id,
            created_at: Utc::now(),
        };

        let update = ComplaintUpdate::new(WritePrecondition::Unassigned)
            .assign(assignee.id)
            .status(escalated)
            .note(note);

        match self.complaints.update(complaint_id, update).await? {
            WriteOutcome::Applied(updated) => {
                tracing::info!(
                    "Complaint auto-assigned: id={}, faculty={}, workload={}, confidence={:.2}, status={}, by={}",
                    complaint_id,
                    assignee.id,
                    suggestion.workload,
                    suggestion.confidence,
                    updated.status,
                    actor.user_id
                );

                Ok(AssignmentOutcome {
                    complaint: updated,
                    assignee,
                    suggestion: Some(suggestion),
                })
            }
            WriteOutcome::Rejected(latest) => {
                tracing::warn!(
                    "Auto-assign of complaint {} lost a race: now assigned to {:?}",
                    complaint_id,
                    latest.assignee_id
                );

                match latest.assignee_id {
                    Some(assignee_id) => Err(AppError::AlreadyAssigned {
                        complaint_id,
                        assignee_id,
                    }),
                    None => Err(AppError::Internal(format!(
                        "Unassigned write on complaint {} rejected while unassigned",
                        complaint_id
                    ))),
                }
            }
            WriteOutcome::Missing => Err(AppError::NotFound(format!(
                "Complaint {} not found",
                complaint_id
            ))),
        }
    }

    /// Admin assignment to a chosen faculty member. Always sets status to in-progress,
    /// including for complaints that were already resolved.
    pub async fn manual_assign(
        &self,
        complaint_id: Uuid,
        faculty_id: Uuid,
        actor: &AuthenticatedUser,
    ) -> Result<AssignmentOutcome> {
        if !actor.is_admin() {
            return Err(AppError::Forbidden(
                "Only admins can assign complaints manually".to_string(),
            ));
        }

        let faculty = self
            .directory
            .get(faculty_id)
            .await?
            .filter(|u| u.is_faculty())
            .ok_or_else(|| {
                AppError::InvalidTarget(format!("{} is not a faculty account", faculty_id))
            })?;
        let assignee = FacultyProfile::from(faculty);

        let note = AuditNote {
            message: format!("Assigned manually to {}", assignee.name),
            author_id: actor.user_id,
            created_at: Utc::now(),
        };

        let update = ComplaintUpdate::new(WritePrecondition::Any)
            .assign(assignee.id)
            .status(Some(ComplaintStatus::InProgress))
            .note(note);

        match self.complaints.update(complaint_id, update).await? {
            WriteOutcome::Applied(updated) => {
                tracing::info!(
                    "Complaint manually assigned: id={}, faculty={}, by={}",
                    complaint_id,
                    assignee.id,
                    actor.user_id
                );

                Ok(AssignmentOutcome {
                    complaint: updated,
                    assignee,
                    suggestion: None,
                })
            }
            WriteOutcome::Rejected(_) => Err(AppError::Internal(format!(
                "Unconditional write on complaint {} was rejected",
                complaint_id
            ))),
            WriteOutcome::Missing => Err(AppError::NotFound(format!(
                "Complaint {} not found",
                complaint_id
            ))),
        }
    }
}
