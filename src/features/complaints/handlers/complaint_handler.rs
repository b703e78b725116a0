use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{RequireAdmin, RequireFaculty, RequireStudent};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::complaints::dtos::{
    ComplaintListQuery, ComplaintResponseDto, CreateComplaintDto, UpdateStatusDto,
};
use crate::features::complaints::services::ComplaintService;
use crate::shared::types::{ApiResponse, Meta};

/// File a new complaint
#[utoipa::path(
    post,
    path = "/api/complaints",
    request_body = CreateComplaintDto,
    responses(
        (status = 201, description = "Complaint filed", body = ApiResponse<ComplaintResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Students only")
    ),
    security(("bearer_auth" = [])),
    tag = "complaints"
)]
pub async fn create_complaint(
    RequireStudent(user): RequireStudent,
    State(service): State<Arc<ComplaintService>>,
    AppJson(dto): AppJson<CreateComplaintDto>,
) -> Result<(StatusCode, Json<ApiResponse<ComplaintResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let complaint = service.create(&user, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(ComplaintResponseDto::for_creator(complaint)),
            Some("Complaint submitted".to_string()),
            None,
        )),
    ))
}

/// List complaints filed by the current student
#[utoipa::path(
    get,
    path = "/api/complaints/my",
    responses(
        (status = 200, description = "Own complaints, newest first", body = ApiResponse<Vec<ComplaintResponseDto>>),
        (status = 403, description = "Students only")
    ),
    security(("bearer_auth" = [])),
    tag = "complaints"
)]
pub async fn list_my_complaints(
    RequireStudent(user): RequireStudent,
    State(service): State<Arc<ComplaintService>>,
) -> Result<Json<ApiResponse<Vec<ComplaintResponseDto>>>> {
    let complaints: Vec<ComplaintResponseDto> = service
        .list_mine(&user)
        .await?
        .into_iter()
        .map(ComplaintResponseDto::for_creator)
        .collect();
    let total = complaints.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(complaints),
        None,
        Some(Meta { total }),
    )))
}

/// List all complaints (admin)
#[utoipa::path(
    get,
    path = "/api/complaints",
    params(ComplaintListQuery),
    responses(
        (status = 200, description = "Complaints, newest first", body = ApiResponse<Vec<ComplaintResponseDto>>),
        (status = 400, description = "Unknown status filter"),
        (status = 403, description = "Admins only")
    ),
    security(("bearer_auth" = [])),
    tag = "complaints"
)]
pub async fn list_complaints(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ComplaintService>>,
    Query(query): Query<ComplaintListQuery>,
) -> Result<Json<ApiResponse<Vec<ComplaintResponseDto>>>> {
    let complaints: Vec<ComplaintResponseDto> = service
        .list_all(&query)
        .await?
        .into_iter()
        .map(ComplaintResponseDto::from)
        .collect();
    let total = complaints.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(complaints),
        None,
        Some(Meta { total }),
    )))
}

/// List complaints assigned to the current faculty member
#[utoipa::path(
    get,
    path = "/api/faculty/complaints",
    responses(
        (status = 200, description = "Assigned complaints, newest first", body = ApiResponse<Vec<ComplaintResponseDto>>),
        (status = 403, description = "Faculty only")
    ),
    security(("bearer_auth" = [])),
    tag = "complaints"
)]
pub async fn list_assigned_complaints(
    RequireFaculty(user): RequireFaculty,
    State(service): State<Arc<ComplaintService>>,
) -> Result<Json<ApiResponse<Vec<ComplaintResponseDto>>>> {
    let complaints: Vec<ComplaintResponseDto> = service
        .list_assigned(&user)
        .await?
        .into_iter()
        .map(ComplaintResponseDto::from)
        .collect();
    let total = complaints.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(complaints),
        None,
        Some(Meta { total }),
    )))
}

/// Change a complaint's status
///
/// Admins may set any status. Faculty may set `in-progress` or `resolved`
/// on complaints assigned to them.
#[utoipa::path(
    patch,
    path = "/api/complaints/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Complaint ID")
    ),
    request_body = UpdateStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ComplaintResponseDto>),
        (status = 400, description = "Invalid status"),
        (status = 403, description = "Transition not allowed for this user"),
        (status = 404, description = "Complaint not found")
    ),
    security(("bearer_auth" = [])),
    tag = "complaints"
)]
pub async fn update_complaint_status(
    user: AuthenticatedUser,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateStatusDto>,
) -> Result<Json<ApiResponse<ComplaintResponseDto>>> {
    let complaint = service.update_status(id, &dto.status, &user).await?;
    Ok(Json(ApiResponse::success(
        Some(complaint.into()),
        Some("Status updated".to_string()),
        None,
    )))
}

/// Change the status of a complaint assigned to the calling faculty member
#[utoipa::path(
    patch,
    path = "/api/faculty/complaints/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Complaint ID")
    ),
    request_body = UpdateStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ComplaintResponseDto>),
        (status = 400, description = "Invalid status"),
        (status = 403, description = "Faculty only, and only on assigned complaints"),
        (status = 404, description = "Complaint not found")
    ),
    security(("bearer_auth" = [])),
    tag = "complaints"
)]
pub async fn update_assigned_complaint_status(
    RequireFaculty(user): RequireFaculty,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateStatusDto>,
) -> Result<Json<ApiResponse<ComplaintResponseDto>>> {
    let complaint = service.update_status(id, &dto.status, &user).await?;
    Ok(Json(ApiResponse::success(
        Some(complaint.into()),
        Some("Status updated".to_string()),
        None,
    )))
}
