//! Role-gated complaint status transitions.
//!
//! Every legal `(role, requested status)` pair is listed in [`TRANSITIONS`];
//! anything absent is forbidden. Admins may move a complaint to any status from
//! any status, including back out of `resolved`. Faculty may only move
//! complaints they are currently assigned to, and only forward.

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::complaints::models::{Complaint, ComplaintStatus};
use crate::features::faculty::models::UserRole;
use crate::modules::store::WritePrecondition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionRule {
    /// Allowed from any current state
    Unrestricted,
    /// Allowed only while the actor is the complaint's assignee
    AssigneeOnly,
}

pub const TRANSITIONS: &[(UserRole, ComplaintStatus, TransitionRule)] = &[
    (UserRole::Admin, ComplaintStatus::Submitted, TransitionRule::Unrestricted),
    (UserRole::Admin, ComplaintStatus::InProgress, TransitionRule::Unrestricted),
    (UserRole::Admin, ComplaintStatus::Resolved, TransitionRule::Unrestricted),
    (UserRole::Faculty, ComplaintStatus::InProgress, TransitionRule::AssigneeOnly),
    (UserRole::Faculty, ComplaintStatus::Resolved, TransitionRule::AssigneeOnly),
];

pub fn transition_rule(role: UserRole, requested: ComplaintStatus) -> Option<TransitionRule> {
    TRANSITIONS
        .iter()
        .find(|(r, s, _)| *r == role && *s == requested)
        .map(|(_, _, rule)| *rule)
}

/// Decide whether `actor` may set `complaint` to `requested`.
///
/// Returns the precondition the store must re-check when writing, so that an
/// assignee who loses the complaint between read and write cannot still move it.
pub fn authorize(
    actor: &AuthenticatedUser,
    complaint: &Complaint,
    requested: ComplaintStatus,
) -> Result<WritePrecondition> {
    match transition_rule(actor.role, requested) {
        Some(TransitionRule::Unrestricted) => Ok(WritePrecondition::Any),
        Some(TransitionRule::AssigneeOnly) if complaint.is_assigned_to(actor.user_id) => {
            Ok(WritePrecondition::AssignedTo(actor.user_id))
        }
        Some(TransitionRule::AssigneeOnly) => Err(AppError::Forbidden(format!(
            "Complaint {} is not assigned to you",
            complaint.id
        ))),
        None => Err(AppError::Forbidden(format!(
            "Role {} may not set status to {}",
            actor.role, requested
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::complaints::models::{AuditTrail, ComplaintPriority};
    use chrono::Utc;
    use uuid::Uuid;

    const ALL: [ComplaintStatus; 3] = [
        ComplaintStatus::Submitted,
        ComplaintStatus::InProgress,
        ComplaintStatus::Resolved,
    ];

    fn complaint(status: ComplaintStatus, assignee_id: Option<Uuid>) -> Complaint {
        Complaint {
            id: Uuid::now_v7(),
            title: "Projector broken".to_string(),
            description: "Room 204 projector does not turn on".to_string(),
            category: "IT Services".to_string(),
            status,
            priority: ComplaintPriority::Medium,
            anonymous: false,
            created_by: Uuid::now_v7(),
            assignee_id,
            attachments: Vec::new(),
            notes: AuditTrail::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_admin_may_set_any_status_from_any_status() {
        let admin = AuthenticatedUser::new(Uuid::now_v7(), UserRole::Admin);
        for current in ALL {
            for requested in ALL {
                let c = complaint(current, None);
                assert_eq!(
                    authorize(&admin, &c, requested).unwrap(),
                    WritePrecondition::Any
                );
            }
        }
    }

    #[test]
    fn test_assigned_faculty_may_progress_and_resolve() {
        let faculty = AuthenticatedUser::new(Uuid::now_v7(), UserRole::Faculty);
        let c = complaint(ComplaintStatus::Submitted, Some(faculty.user_id));

        for requested in [ComplaintStatus::InProgress, ComplaintStatus::Resolved] {
            assert_eq!(
                authorize(&faculty, &c, requested).unwrap(),
                WritePrecondition::AssignedTo(faculty.user_id)
            );
        }
    }

    #[test]
    fn test_faculty_may_not_reset_to_submitted() {
        let faculty = AuthenticatedUser::new(Uuid::now_v7(), UserRole::Faculty);
        let c = complaint(ComplaintStatus::InProgress, Some(faculty.user_id));

        assert!(matches!(
            authorize(&faculty, &c, ComplaintStatus::Submitted),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_other_faculty_is_forbidden() {
        let assignee = Uuid::now_v7();
        let other = AuthenticatedUser::new(Uuid::now_v7(), UserRole::Faculty);

        let assigned = complaint(ComplaintStatus::InProgress, Some(assignee));
        let unassigned = complaint(ComplaintStatus::Submitted, None);

        assert!(matches!(
            authorize(&other, &assigned, ComplaintStatus::Resolved),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            authorize(&other, &unassigned, ComplaintStatus::InProgress),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_students_are_read_only() {
        let student = AuthenticatedUser::new(Uuid::now_v7(), UserRole::Student);
        let c = complaint(ComplaintStatus::Submitted, None);

        for requested in ALL {
            assert_eq!(transition_rule(UserRole::Student, requested), None);
            assert!(authorize(&student, &c, requested).is_err());
        }
    }

    #[test]
    fn test_table_is_enumerable() {
        let legal: Vec<(UserRole, ComplaintStatus)> =
            TRANSITIONS.iter().map(|(r, s, _)| (*r, *s)).collect();
        assert_eq!(legal.len(), 5);
        assert!(!legal.contains(&(UserRole::Faculty, ComplaintStatus::Submitted)));
    }
}
