use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Account role matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Faculty,
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Student => write!(f, "student"),
            UserRole::Faculty => write!(f, "faculty"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

/// Database model for an account
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_faculty(&self) -> bool {
        self.role == UserRole::Faculty
    }
}

/// Directory projection used when ranking faculty: {id, name, email, department}
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct FacultyProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
}

impl From<User> for FacultyProfile {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            department: u.department,
        }
    }
}

/// Data for creating a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub department: Option<String>,
}
