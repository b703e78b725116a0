use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::AppError;

/// Complaint status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "complaint_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ComplaintStatus {
    Submitted,
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    /// Statuses that count as pending work for the assignee
    pub const ACTIVE: [ComplaintStatus; 2] = [ComplaintStatus::Submitted, ComplaintStatus::InProgress];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Submitted => "submitted",
            ComplaintStatus::InProgress => "in-progress",
            ComplaintStatus::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComplaintStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(ComplaintStatus::Submitted),
            "in-progress" => Ok(ComplaintStatus::InProgress),
            "resolved" => Ok(ComplaintStatus::Resolved),
            other => Err(AppError::InvalidStatus(other.to_string())),
        }
    }
}

/// Complaint priority enum matching database enum
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "complaint_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ComplaintPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for ComplaintPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplaintPriority::Low => write!(f, "low"),
            ComplaintPriority::Medium => write!(f, "medium"),
            ComplaintPriority::High => write!(f, "high"),
        }
    }
}

/// One entry of a complaint's audit trail. Never modified once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuditNote {
    pub message: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Ordered, append-only sequence of audit notes owned by a single complaint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AuditTrail(Vec<AuditNote>);

impl AuditTrail {
    pub fn as_slice(&self) -> &[AuditNote] {
        &self.0
    }
}

#[cfg(test)]
impl AuditTrail {
    pub fn append(&mut self, note: AuditNote) {
        self.0.push(note);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&AuditNote> {
        self.0.last()
    }
}

impl From<Vec<AuditNote>> for AuditTrail {
    fn from(notes: Vec<AuditNote>) -> Self {
        Self(notes)
    }
}

/// Complaint row as stored, without its notes
#[derive(Debug, Clone, FromRow)]
pub struct ComplaintRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: ComplaintStatus,
    pub priority: ComplaintPriority,
    pub anonymous: bool,
    pub created_by: Uuid,
    pub assignee_id: Option<Uuid>,
    pub attachments: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ComplaintRow {
    pub fn with_notes(self, notes: AuditTrail) -> Complaint {
        Complaint {
            id: self.id,
            title: self.title,
            description: self.description,
            category: self.category,
            status: self.status,
            priority: self.priority,
            anonymous: self.anonymous,
            created_by: self.created_by,
            assignee_id: self.assignee_id,
            attachments: self.attachments,
            notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Domain model for a complaint
///
/// `assignee_id` is either absent or references an account with the faculty role.
#[derive(Debug, Clone)]
pub struct Complaint {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: ComplaintStatus,
    pub priority: ComplaintPriority,
    pub anonymous: bool,
    pub created_by: Uuid,
    pub assignee_id: Option<Uuid>,
    pub attachments: Vec<String>,
    pub notes: AuditTrail,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Complaint {
    pub fn is_assigned_to(&self, user_id: Uuid) -> bool {
        self.assignee_id == Some(user_id)
    }
}

/// Data for creating a new complaint
#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: ComplaintPriority,
    pub anonymous: bool,
    pub created_by: Uuid,
    pub attachments: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_wire_values() {
        assert_eq!(
            "in-progress".parse::<ComplaintStatus>().unwrap(),
            ComplaintStatus::InProgress
        );
        assert_eq!(
            "submitted".parse::<ComplaintStatus>().unwrap(),
            ComplaintStatus::Submitted
        );
        assert_eq!(
            "resolved".parse::<ComplaintStatus>().unwrap(),
            ComplaintStatus::Resolved
        );
    }

    #[test]
    fn test_status_rejects_unknown_values() {
        let err = "in_progress".parse::<ComplaintStatus>().unwrap_err();
        assert!(matches!(err, AppError::InvalidStatus(ref v) if v == "in_progress"));
        assert!("Resolved".parse::<ComplaintStatus>().is_err());
        assert!("".parse::<ComplaintStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_with_hyphen() {
        let json = serde_json::to_string(&ComplaintStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }

    #[test]
    fn test_only_resolved_is_inactive() {
        assert!(ComplaintStatus::ACTIVE.contains(&ComplaintStatus::Submitted));
        assert!(ComplaintStatus::ACTIVE.contains(&ComplaintStatus::InProgress));
        assert!(!ComplaintStatus::ACTIVE.contains(&ComplaintStatus::Resolved));
    }

    #[test]
    fn test_audit_trail_preserves_append_order() {
        let author = Uuid::now_v7();
        let mut trail = AuditTrail::default();
        for message in ["first", "second", "third"] {
            trail.append(AuditNote {
                message: message.to_string(),
                author_id: author,
                created_at: Utc::now(),
            });
        }

        let messages: Vec<&str> = trail.as_slice().iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
        assert_eq!(trail.last().map(|n| n.message.as_str()), Some("third"));
    }
}
