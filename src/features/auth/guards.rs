//! Role-based authorization guards.
//!
//! Roles are flat: an admin is not implicitly a faculty member or a student.
//! Handlers that accept several roles take `AuthenticatedUser` directly and let
//! the service decide.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::faculty::models::UserRole;
use axum::{extract::FromRequestParts, http::request::Parts};

fn require_role(parts: &Parts, role: UserRole) -> Result<AuthenticatedUser, AppError> {
    let user = parts
        .extensions
        .get::<AuthenticatedUser>()
        .copied()
        .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

    if user.role != role {
        return Err(AppError::Forbidden(format!("{} access required", role)));
    }

    Ok(user)
}

/// Guard for admin-only operations.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, UserRole::Admin).map(RequireAdmin)
    }
}

/// Guard for faculty-only operations.
pub struct RequireFaculty(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireFaculty
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, UserRole::Faculty).map(RequireFaculty)
    }
}

/// Guard for student-only operations (filing and tracking complaints).
pub struct RequireStudent(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireStudent
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, UserRole::Student).map(RequireStudent)
    }
}
