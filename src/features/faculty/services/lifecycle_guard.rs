//! Guards on faculty removal and bulk reassignment.
//!
//! A faculty member can only be deleted once nothing is pending on them;
//! their resolved history is kept but unassigned. Reassignment moves pending
//! work only, leaving resolved complaints with their original assignee.

use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::faculty::models::User;
use crate::modules::store::{ComplaintFilter, ComplaintStore, FacultyRemoval, UserDirectory};

pub struct FacultyLifecycleGuard {
    complaints: Arc<dyn ComplaintStore>,
    directory: Arc<dyn UserDirectory>,
}

impl FacultyLifecycleGuard {
    pub fn new(complaints: Arc<dyn ComplaintStore>, directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            complaints,
            directory,
        }
    }

    async fn faculty_account(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.directory.get(id).await?.filter(|u| u.is_faculty()))
    }

    /// Delete a faculty account; returns how many resolved complaints were unassigned.
    pub async fn delete(&self, faculty_id: Uuid) -> Result<u64> {
        let user = self
            .directory
            .get(faculty_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", faculty_id)))?;

        if !user.is_faculty() {
            return Err(AppError::InvalidTarget(format!(
                "{} is a {} account, not faculty",
                faculty_id, user.role
            )));
        }

        match self.directory.remove_faculty_if_idle(faculty_id).await? {
            FacultyRemoval::Removed { unassigned } => {
                tracing::info!(
                    "Faculty deleted: id={}, unassigned_resolved={}",
                    faculty_id,
                    unassigned
                );
                Ok(unassigned)
            }
            FacultyRemoval::Blocked { pending } => {
                tracing::info!(
                    "Faculty deletion refused: id={}, pending={}",
                    faculty_id,
                    pending
                );
                Err(AppError::FacultyHasPendingWork {
                    faculty_id,
                    pending,
                })
            }
        }
    }

    /// Move every pending complaint from one faculty member to another.
    ///
    /// Not all-or-nothing: the returned count is what was actually moved, and
    /// re-running after a partial failure moves the remainder.
    pub async fn reassign(&self, from_id: Uuid, to_id: Uuid) -> Result<u64> {
        if from_id == to_id {
            return Err(AppError::SameSourceTarget(from_id));
        }

        for id in [from_id, to_id] {
            if self.faculty_account(id).await?.is_none() {
                return Err(AppError::InvalidTarget(format!(
                    "{} is not a faculty account",
                    id
                )));
            }
        }

        let moved = self
            .complaints
            .set_assignee_where(&ComplaintFilter::assigned_to(from_id).active(), Some(to_id))
            .await?;

        tracing::info!(
            "Complaints reassigned: from={}, to={}, moved={}",
            from_id,
            to_id,
            moved
        );

        Ok(moved)
    }
}
