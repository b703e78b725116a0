use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid status '{0}'. Allowed: submitted, in-progress, resolved")]
    InvalidStatus(String),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Complaint {complaint_id} is already assigned to {assignee_id}. Use manual reassignment instead")]
    AlreadyAssigned { complaint_id: Uuid, assignee_id: Uuid },

    #[error("No faculty found in system")]
    NoFacultyAvailable,

    #[error("No suitable faculty found for department '{department}'")]
    NoSuitableFaculty { department: String },

    #[error("Cannot delete faculty {faculty_id}: {pending} complaints are still pending or in progress")]
    FacultyHasPendingWork { faculty_id: Uuid, pending: i64 },

    #[error("Cannot reassign complaints of faculty {0} to the same faculty")]
    SameSourceTarget(Uuid),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_)
            | AppError::NoFacultyAvailable
            | AppError::NoSuitableFaculty { .. } => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::InvalidStatus(_)
            | AppError::InvalidTarget(_)
            | AppError::SameSourceTarget(_)
            | AppError::Validation(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::AlreadyAssigned { .. }
            | AppError::FacultyHasPendingWork { .. }
            | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (message, errors) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                ("Database error occurred".to_string(), None)
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                ("Internal server error".to_string(), None)
            }
            AppError::Validation(ref msg) => (msg.clone(), Some(vec![msg.clone()])),
            AppError::NotFound(ref msg)
            | AppError::Forbidden(ref msg)
            | AppError::InvalidTarget(ref msg)
            | AppError::BadRequest(ref msg)
            | AppError::Unauthorized(ref msg)
            | AppError::Conflict(ref msg) => (msg.clone(), None),
            ref other => (other.to_string(), None),
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
