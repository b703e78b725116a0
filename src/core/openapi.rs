use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::assignment::{dtos as assignment_dtos, handlers as assignment_handlers};
use crate::features::auth;
use crate::features::complaints::{
    dtos as complaints_dtos, handlers as complaints_handlers, models as complaints_models,
};
use crate::features::faculty::{
    dtos as faculty_dtos, handlers as faculty_handlers, models as faculty_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Complaints
        complaints_handlers::create_complaint,
        complaints_handlers::list_my_complaints,
        complaints_handlers::list_complaints,
        complaints_handlers::list_assigned_complaints,
        complaints_handlers::update_complaint_status,
        complaints_handlers::update_assigned_complaint_status,
        // Assignment
        assignment_handlers::recommend_faculty,
        assignment_handlers::auto_assign,
        assignment_handlers::manual_assign,
        // Faculty
        faculty_handlers::list_faculty,
        faculty_handlers::create_faculty,
        faculty_handlers::delete_faculty,
        faculty_handlers::reassign_faculty,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::AuthenticatedUser,
            faculty_models::UserRole,
            // Complaints
            complaints_models::ComplaintStatus,
            complaints_models::ComplaintPriority,
            complaints_dtos::CreateComplaintDto,
            complaints_dtos::UpdateStatusDto,
            complaints_dtos::AuditNoteDto,
            complaints_dtos::ComplaintResponseDto,
            ApiResponse<complaints_dtos::ComplaintResponseDto>,
            ApiResponse<Vec<complaints_dtos::ComplaintResponseDto>>,
            // Assignment
            assignment_dtos::Suggestion,
            assignment_dtos::RecommendRequestDto,
            assignment_dtos::AutoAssignRequestDto,
            assignment_dtos::ManualAssignDto,
            assignment_dtos::AssigneeDto,
            assignment_dtos::AssignmentResultDto,
            ApiResponse<assignment_dtos::Suggestion>,
            ApiResponse<assignment_dtos::AssignmentResultDto>,
            // Faculty
            faculty_dtos::CreateFacultyDto,
            faculty_dtos::FacultyResponseDto,
            faculty_dtos::FacultyCreatedDto,
            faculty_dtos::FacultyDeletedDto,
            faculty_dtos::ReassignResultDto,
            ApiResponse<Vec<faculty_dtos::FacultyResponseDto>>,
            ApiResponse<faculty_dtos::FacultyCreatedDto>,
            ApiResponse<faculty_dtos::FacultyDeletedDto>,
            ApiResponse<faculty_dtos::ReassignResultDto>,
        )
    ),
    tags(
        (name = "complaints", description = "Filing, listing and status changes"),
        (name = "assignment", description = "Faculty recommendation and assignment (admin only)"),
        (name = "faculty", description = "Faculty administration (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Complaint Desk API",
        version = "0.1.0",
        description = "Campus complaint intake and faculty assignment",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
