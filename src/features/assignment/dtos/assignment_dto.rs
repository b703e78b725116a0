use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::assignment::services::AssignmentOutcome;
use crate::features::complaints::dtos::ComplaintResponseDto;

/// Recommendation produced by the faculty selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Suggestion {
    pub faculty_id: Uuid,
    pub faculty_name: String,
    /// Faculty's declared department, or "N/A"
    pub department: String,
    /// Active complaints at the time of ranking
    pub workload: i64,
    /// Heuristic in [0.55, 0.95], not a probability
    pub confidence: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecommendRequestDto {
    pub complaint_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AutoAssignRequestDto {
    pub complaint_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ManualAssignDto {
    pub faculty_id: Uuid,
}

/// Faculty member chosen by an assignment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssigneeDto {
    pub id: Uuid,
    pub name: String,
    pub department: Option<String>,
}

/// Outcome of an assignment: the updated complaint and what was decided
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignmentResultDto {
    pub complaint: ComplaintResponseDto,
    pub assigned_to: AssigneeDto,
    /// Present for automatic assignments
    pub suggestion: Option<Suggestion>,
}

impl From<AssignmentOutcome> for AssignmentResultDto {
    fn from(o: AssignmentOutcome) -> Self {
        Self {
            complaint: o.complaint.into(),
            assigned_to: AssigneeDto {
                id: o.assignee.id,
                name: o.assignee.name,
                department: o.assignee.department,
            },
            suggestion: o.suggestion,
        }
    }
}
