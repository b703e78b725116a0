use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::faculty::dtos::{
    CreateFacultyDto, FacultyCreatedDto, FacultyDeletedDto, FacultyResponseDto, ReassignResultDto,
};
use crate::features::faculty::services::{FacultyLifecycleGuard, FacultyService};
use crate::shared::types::{ApiResponse, Meta};

/// State for faculty handlers
#[derive(Clone)]
pub struct FacultyState {
    pub faculty_service: Arc<FacultyService>,
    pub lifecycle_guard: Arc<FacultyLifecycleGuard>,
}

/// List faculty with their current workload
#[utoipa::path(
    get,
    path = "/api/admin/faculty",
    responses(
        (status = 200, description = "Faculty in creation order", body = ApiResponse<Vec<FacultyResponseDto>>),
        (status = 403, description = "Admins only")
    ),
    security(("bearer_auth" = [])),
    tag = "faculty"
)]
pub async fn list_faculty(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<FacultyState>,
) -> Result<Json<ApiResponse<Vec<FacultyResponseDto>>>> {
    let faculty = state.faculty_service.list().await?;
    let total = faculty.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(faculty),
        None,
        Some(Meta { total }),
    )))
}

/// Create a faculty account
#[utoipa::path(
    post,
    path = "/api/admin/faculty",
    request_body = CreateFacultyDto,
    responses(
        (status = 201, description = "Faculty created", body = ApiResponse<FacultyCreatedDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already in use")
    ),
    security(("bearer_auth" = [])),
    tag = "faculty"
)]
pub async fn create_faculty(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<FacultyState>,
    AppJson(dto): AppJson<CreateFacultyDto>,
) -> Result<(StatusCode, Json<ApiResponse<FacultyCreatedDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = state.faculty_service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(user.into()),
            Some("Faculty created".to_string()),
            None,
        )),
    ))
}

/// Delete a faculty account with no pending complaints
#[utoipa::path(
    delete,
    path = "/api/admin/faculty/{id}",
    params(
        ("id" = Uuid, Path, description = "Faculty user ID")
    ),
    responses(
        (status = 200, description = "Faculty deleted", body = ApiResponse<FacultyDeletedDto>),
        (status = 400, description = "Account is not faculty"),
        (status = 404, description = "Account not found"),
        (status = 409, description = "Faculty still has pending complaints")
    ),
    security(("bearer_auth" = [])),
    tag = "faculty"
)]
pub async fn delete_faculty(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<FacultyState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FacultyDeletedDto>>> {
    let unassigned = state.lifecycle_guard.delete(id).await?;
    Ok(Json(ApiResponse::success(
        Some(FacultyDeletedDto {
            faculty_id: id,
            unassigned,
        }),
        Some("Faculty deleted".to_string()),
        None,
    )))
}

/// Move all pending complaints from one faculty member to another
#[utoipa::path(
    put,
    path = "/api/admin/faculty/{from_id}/reassign/{to_id}",
    params(
        ("from_id" = Uuid, Path, description = "Faculty currently holding the complaints"),
        ("to_id" = Uuid, Path, description = "Faculty receiving the complaints")
    ),
    responses(
        (status = 200, description = "Complaints moved", body = ApiResponse<ReassignResultDto>),
        (status = 400, description = "Same faculty on both sides, or not a faculty account")
    ),
    security(("bearer_auth" = [])),
    tag = "faculty"
)]
pub async fn reassign_faculty(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<FacultyState>,
    Path((from_id, to_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<ReassignResultDto>>> {
    let moved = state.lifecycle_guard.reassign(from_id, to_id).await?;
    Ok(Json(ApiResponse::success(
        Some(ReassignResultDto {
            from_id,
            to_id,
            moved,
        }),
        Some(format!("{} complaints reassigned", moved)),
        None,
    )))
}
