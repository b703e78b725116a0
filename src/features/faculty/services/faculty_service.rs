use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::assignment::services::WorkloadCalculator;
use crate::features::faculty::dtos::{CreateFacultyDto, FacultyResponseDto};
use crate::features::faculty::models::{NewUser, User, UserRole};
use crate::modules::store::UserDirectory;

/// Service for the faculty directory
pub struct FacultyService {
    directory: Arc<dyn UserDirectory>,
    workload: WorkloadCalculator,
}

impl FacultyService {
    pub fn new(directory: Arc<dyn UserDirectory>, workload: WorkloadCalculator) -> Self {
        Self {
            directory,
            workload,
        }
    }

    /// All faculty in creation order, each with its current workload
    pub async fn list(&self) -> Result<Vec<FacultyResponseDto>> {
        let faculty = self.directory.list_faculty().await?;
        let ids: Vec<_> = faculty.iter().map(|f| f.id).collect();
        let workloads = self.workload.compute_many(&ids).await?;

        Ok(faculty
            .into_iter()
            .map(|f| {
                let workload = workloads.get(&f.id).copied().unwrap_or(0);
                FacultyResponseDto::new(f, workload)
            })
            .collect())
    }

    pub async fn create(&self, dto: CreateFacultyDto) -> Result<User> {
        let email = dto.email.trim().to_lowercase();

        if self.directory.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "An account with email {} already exists",
                email
            )));
        }

        let user = self
            .directory
            .create(NewUser {
                name: dto.name.trim().to_string(),
                email,
                role: UserRole::Faculty,
                department: Some(dto.department.trim().to_string()),
            })
            .await?;

        tracing::info!(
            "Faculty created: id={}, email={}, department={:?}",
            user.id,
            user.email,
            user.department
        );

        Ok(user)
    }
}
