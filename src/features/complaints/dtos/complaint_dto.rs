use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::complaints::models::{
    AuditNote, Complaint, ComplaintPriority, ComplaintStatus,
};
use crate::shared::constants::MAX_TITLE_LENGTH;

/// Request DTO for filing a complaint
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateComplaintDto {
    /// Length is checked after trimming, see [`CreateComplaintDto::trimmed_title`]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    /// Free-form category, e.g. "IT Services" or "Infrastructure"
    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,

    /// Defaults to medium
    pub priority: Option<ComplaintPriority>,

    #[serde(default)]
    pub anonymous: bool,

    /// Attachment references (URLs or storage keys)
    #[serde(default)]
    #[validate(length(max = 3, message = "At most 3 attachments are allowed"))]
    pub attachments: Vec<String>,
}

impl CreateComplaintDto {
    /// Title after trimming, or `None` if it ends up empty or too long
    pub fn trimmed_title(&self) -> Option<&str> {
        let title = self.title.trim();
        (!title.is_empty() && title.chars().count() <= MAX_TITLE_LENGTH).then_some(title)
    }
}

/// Request DTO for changing a complaint's status
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusDto {
    /// One of `submitted`, `in-progress`, `resolved`
    pub status: String,
}

/// Query parameters for the admin complaint listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ComplaintListQuery {
    /// Filter by status (`submitted`, `in-progress`, `resolved`)
    pub status: Option<String>,
    /// Filter by assigned faculty
    pub assignee_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditNoteDto {
    pub message: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<&AuditNote> for AuditNoteDto {
    fn from(n: &AuditNote) -> Self {
        Self {
            message: n.message.clone(),
            author_id: n.author_id,
            created_at: n.created_at,
        }
    }
}

/// Response DTO for complaint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComplaintResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: ComplaintStatus,
    pub priority: ComplaintPriority,
    pub anonymous: bool,
    /// Absent for anonymous complaints
    pub created_by: Option<Uuid>,
    pub assignee_id: Option<Uuid>,
    pub attachments: Vec<String>,
    pub notes: Vec<AuditNoteDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ComplaintResponseDto {
    /// Response for the complaint's own creator, who always sees their reference
    pub fn for_creator(c: Complaint) -> Self {
        let created_by = c.created_by;
        let mut dto = Self::from(c);
        dto.created_by = Some(created_by);
        dto
    }
}

impl From<Complaint> for ComplaintResponseDto {
    fn from(c: Complaint) -> Self {
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            category: c.category,
            status: c.status,
            priority: c.priority,
            anonymous: c.anonymous,
            created_by: (!c.anonymous).then_some(c.created_by),
            assignee_id: c.assignee_id,
            attachments: c.attachments,
            notes: c.notes.as_slice().iter().map(AuditNoteDto::from).collect(),
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
