use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::assignment::dtos::{
    AssignmentResultDto, AutoAssignRequestDto, ManualAssignDto, RecommendRequestDto, Suggestion,
};
use crate::features::assignment::services::AssignmentService;
use crate::features::auth::guards::RequireAdmin;
use crate::shared::types::ApiResponse;

/// Recommend a faculty member for a complaint without assigning it
#[utoipa::path(
    post,
    path = "/api/assignment/recommend",
    request_body = RecommendRequestDto,
    responses(
        (status = 200, description = "Recommended faculty", body = ApiResponse<Suggestion>),
        (status = 404, description = "Complaint not found, or no faculty available")
    ),
    security(("bearer_auth" = [])),
    tag = "assignment"
)]
pub async fn recommend_faculty(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AssignmentService>>,
    AppJson(dto): AppJson<RecommendRequestDto>,
) -> Result<Json<ApiResponse<Suggestion>>> {
    let suggestion = service.recommend(dto.complaint_id).await?;
    Ok(Json(ApiResponse::success(Some(suggestion), None, None)))
}

/// Assign an unassigned complaint to the recommended faculty member
#[utoipa::path(
    post,
    path = "/api/assignment/auto-assign",
    request_body = AutoAssignRequestDto,
    responses(
        (status = 200, description = "Complaint assigned", body = ApiResponse<AssignmentResultDto>),
        (status = 404, description = "Complaint not found, or no faculty available"),
        (status = 409, description = "Complaint already assigned")
    ),
    security(("bearer_auth" = [])),
    tag = "assignment"
)]
pub async fn auto_assign(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<AssignmentService>>,
    AppJson(dto): AppJson<AutoAssignRequestDto>,
) -> Result<Json<ApiResponse<AssignmentResultDto>>> {
    let outcome = service.auto_assign(dto.complaint_id, &admin).await?;
    let message = format!("Assigned to {}", outcome.assignee.name);

    Ok(Json(ApiResponse::success(
        Some(outcome.into()),
        Some(message),
        None,
    )))
}

/// Assign a complaint to a chosen faculty member
#[utoipa::path(
    put,
    path = "/api/complaints/{id}/assign",
    params(
        ("id" = Uuid, Path, description = "Complaint ID")
    ),
    request_body = ManualAssignDto,
    responses(
        (status = 200, description = "Complaint assigned", body = ApiResponse<AssignmentResultDto>),
        (status = 400, description = "Target is not a faculty account"),
        (status = 404, description = "Complaint not found")
    ),
    security(("bearer_auth" = [])),
    tag = "assignment"
)]
pub async fn manual_assign(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<AssignmentService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<ManualAssignDto>,
) -> Result<Json<ApiResponse<AssignmentResultDto>>> {
    let outcome = service.manual_assign(id, dto.faculty_id, &admin).await?;
    Ok(Json(ApiResponse::success(Some(outcome.into()), None, None)))
}
