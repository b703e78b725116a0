use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::faculty::models::{FacultyProfile, User};

/// Request DTO for creating a faculty account
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateFacultyDto {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Department used when matching complaints, e.g. "IT" or "Maintenance"
    #[validate(length(min = 1, max = 100, message = "Department is required"))]
    pub department: String,
}

/// Faculty member with their live workload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FacultyResponseDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    /// Submitted and in-progress complaints currently assigned
    pub workload: i64,
}

impl FacultyResponseDto {
    pub fn new(profile: FacultyProfile, workload: i64) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            department: profile.department,
            workload,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FacultyCreatedDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for FacultyCreatedDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            department: u.department,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FacultyDeletedDto {
    pub faculty_id: Uuid,
    /// Resolved complaints whose assignee was cleared
    pub unassigned: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReassignResultDto {
    pub from_id: Uuid,
    pub to_id: Uuid,
    /// Pending complaints moved to the new faculty member
    pub moved: u64,
}
