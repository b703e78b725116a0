use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::lifecycle;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::complaints::dtos::{ComplaintListQuery, CreateComplaintDto};
use crate::features::complaints::models::{AuditNote, Complaint, ComplaintStatus, NewComplaint};
use crate::modules::store::{ComplaintFilter, ComplaintStore, ComplaintUpdate, WriteOutcome};
use crate::shared::constants::{MAX_ATTACHMENTS, MAX_TITLE_LENGTH};

/// Service for filing, listing and moving complaints through their lifecycle
pub struct ComplaintService {
    complaints: Arc<dyn ComplaintStore>,
}

impl ComplaintService {
    pub fn new(complaints: Arc<dyn ComplaintStore>) -> Self {
        Self { complaints }
    }

    /// File a new complaint. It starts unassigned, in status submitted.
    pub async fn create(&self, actor: &AuthenticatedUser, dto: CreateComplaintDto) -> Result<Complaint> {
        let title = dto
            .trimmed_title()
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Title must be 1-{} characters",
                    MAX_TITLE_LENGTH
                ))
            })?
            .to_string();

        if dto.attachments.len() > MAX_ATTACHMENTS {
            return Err(AppError::Validation(format!(
                "At most {} attachments are allowed",
                MAX_ATTACHMENTS
            )));
        }

        let complaint = self
            .complaints
            .create(NewComplaint {
                title,
                description: dto.description,
                category: dto.category.trim().to_string(),
                priority: dto.priority.unwrap_or_default(),
                anonymous: dto.anonymous,
                created_by: actor.user_id,
                attachments: dto.attachments,
            })
            .await?;

        tracing::info!(
            "Complaint created: id={}, category={}, priority={}, by={}",
            complaint.id,
            complaint.category,
            complaint.priority,
            actor.user_id
        );

        Ok(complaint)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Complaint> {
        self.complaints
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Complaint {} not found", id)))
    }

    /// Complaints filed by the actor, newest first
    pub async fn list_mine(&self, actor: &AuthenticatedUser) -> Result<Vec<Complaint>> {
        self.complaints
            .find(&ComplaintFilter::created_by(actor.user_id))
            .await
    }

    /// Complaints currently assigned to the actor, newest first
    pub async fn list_assigned(&self, actor: &AuthenticatedUser) -> Result<Vec<Complaint>> {
        self.complaints
            .find(&ComplaintFilter::assigned_to(actor.user_id))
            .await
    }

    /// Every complaint, optionally narrowed by status and assignee
    pub async fn list_all(&self, query: &ComplaintListQuery) -> Result<Vec<Complaint>> {
        let mut filter = ComplaintFilter {
            assignee_id: query.assignee_id,
            ..ComplaintFilter::default()
        };
        if let Some(status) = query.status.as_deref() {
            filter = filter.with_statuses(&[status.parse::<ComplaintStatus>()?]);
        }

        self.complaints.find(&filter).await
    }

    /// Apply a status change requested by `actor`, subject to the transition table
    pub async fn update_status(
        &self,
        id: Uuid,
        status: &str,
        actor: &AuthenticatedUser,
    ) -> Result<Complaint> {
        let requested: ComplaintStatus = status.parse()?;

        if lifecycle::transition_rule(actor.role, requested).is_none() {
            return Err(AppError::Forbidden(format!(
                "Role {} may not set status to {}",
                actor.role, requested
            )));
        }

        let current = self.get_by_id(id).await?;
        let precondition = lifecycle::authorize(actor, &current, requested)?;

        let note = AuditNote {
            message: format!("Status changed from {} to {}", current.status, requested),
            author_id: actor.user_id,
            created_at: Utc::now(),
        };

        let update = ComplaintUpdate::new(precondition)
            .status(Some(requested))
            .note(note);

        match self.complaints.update(id, update).await? {
            WriteOutcome::Applied(complaint) => {
                tracing::info!(
                    "Complaint status updated: id={}, {} -> {}, by={} ({})",
                    id,
                    current.status,
                    complaint.status,
                    actor.user_id,
                    actor.role
                );
                Ok(complaint)
            }
            WriteOutcome::Rejected(latest) => {
                tracing::warn!(
                    "Status update on complaint {} rejected: assignee changed to {:?}",
                    id,
                    latest.assignee_id
                );
                Err(AppError::Forbidden(format!(
                    "Complaint {} is not assigned to you",
                    id
                )))
            }
            WriteOutcome::Missing => Err(AppError::NotFound(format!("Complaint {} not found", id))),
        }
    }
}
