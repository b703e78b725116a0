use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use super::{
    ComplaintFilter, ComplaintStore, ComplaintUpdate, FacultyRemoval, UserDirectory,
    WriteOutcome, WritePrecondition,
};
use crate::core::error::{AppError, Result};
use crate::features::complaints::models::{
    AuditNote, AuditTrail, Complaint, ComplaintRow, ComplaintStatus, NewComplaint,
};
use crate::features::faculty::models::{FacultyProfile, NewUser, User, UserRole};

const COMPLAINT_COLUMNS: &str = r#"
    id, title, description, category, status, priority, anonymous,
    created_by, assignee_id, attachments, created_at, updated_at
"#;

const USER_COLUMNS: &str = "id, name, email, role, department, created_at";

#[derive(Debug, FromRow)]
struct NoteRow {
    complaint_id: Uuid,
    message: String,
    author_id: Uuid,
    created_at: DateTime<Utc>,
}

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> AppError {
    move |e| {
        tracing::error!("{}: {:?}", context, e);
        AppError::Database(e)
    }
}

fn status_names(statuses: &[ComplaintStatus]) -> Vec<String> {
    statuses.iter().map(|s| s.as_str().to_string()).collect()
}

/// Append `WHERE ...` for a complaint filter
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ComplaintFilter) {
    builder.push(" WHERE TRUE");
    if let Some(assignee_id) = filter.assignee_id {
        builder.push(" AND assignee_id = ").push_bind(assignee_id);
    }
    if let Some(created_by) = filter.created_by {
        builder.push(" AND created_by = ").push_bind(created_by);
    }
    if let Some(statuses) = &filter.statuses {
        builder
            .push(" AND status::text = ANY(")
            .push_bind(status_names(statuses))
            .push(")");
    }
}

/// Complaint store backed by the `complaints` and `complaint_notes` tables
pub struct PgComplaintStore {
    pool: PgPool,
}

impl PgComplaintStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn attach_notes(&self, rows: Vec<ComplaintRow>) -> Result<Vec<Complaint>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let notes = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT complaint_id, message, author_id, created_at
            FROM complaint_notes
            WHERE complaint_id = ANY($1)
            ORDER BY seq
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load complaint notes"))?;

        let mut by_complaint: HashMap<Uuid, Vec<AuditNote>> = HashMap::new();
        for n in notes {
            by_complaint.entry(n.complaint_id).or_default().push(AuditNote {
                message: n.message,
                author_id: n.author_id,
                created_at: n.created_at,
            });
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let notes = by_complaint.remove(&row.id).unwrap_or_default();
                row.with_notes(AuditTrail::from(notes))
            })
            .collect())
    }

    async fn load_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> std::result::Result<Option<Complaint>, sqlx::Error> {
        let row = sqlx::query_as::<_, ComplaintRow>(&format!(
            "SELECT {} FROM complaints WHERE id = $1",
            COMPLAINT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let notes = sqlx::query_as::<_, AuditNote>(
            r#"
            SELECT message, author_id, created_at
            FROM complaint_notes
            WHERE complaint_id = $1
            ORDER BY seq
            "#,
        )
        .bind(id)
        .fetch_all(&mut **tx)
        .await?;

        Ok(Some(row.with_notes(AuditTrail::from(notes))))
    }
}

#[async_trait]
impl ComplaintStore for PgComplaintStore {
    async fn get(&self, id: Uuid) -> Result<Option<Complaint>> {
        let row = sqlx::query_as::<_, ComplaintRow>(&format!(
            "SELECT {} FROM complaints WHERE id = $1",
            COMPLAINT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to get complaint"))?;

        match row {
            Some(row) => Ok(self.attach_notes(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn create(&self, data: NewComplaint) -> Result<Complaint> {
        let row = sqlx::query_as::<_, ComplaintRow>(&format!(
            r#"
            INSERT INTO complaints (
                id, title, description, category, status, priority, anonymous,
                created_by, attachments
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            COMPLAINT_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.category)
        .bind(ComplaintStatus::Submitted)
        .bind(data.priority)
        .bind(data.anonymous)
        .bind(data.created_by)
        .bind(&data.attachments)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create complaint"))?;

        Ok(row.with_notes(AuditTrail::default()))
    }

    async fn find(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM complaints",
            COMPLAINT_COLUMNS
        ));
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY created_at DESC, id DESC");

        let rows = builder
            .build_query_as::<ComplaintRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list complaints"))?;

        self.attach_notes(rows).await
    }

    async fn count_active_by_assignee(&self, assignee_ids: &[Uuid]) -> Result<HashMap<Uuid, i64>> {
        if assignee_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(Uuid, i64)> = sqlx::query_as(
            r#"
            SELECT assignee_id, COUNT(*)
            FROM complaints
            WHERE assignee_id = ANY($1) AND status::text = ANY($2)
            GROUP BY assignee_id
            "#,
        )
        .bind(assignee_ids)
        .bind(status_names(&ComplaintStatus::ACTIVE))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to compute faculty workloads"))?;

        Ok(rows.into_iter().collect())
    }

    async fn update(&self, id: Uuid, update: ComplaintUpdate) -> Result<WriteOutcome> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin complaint update"))?;

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE complaints SET updated_at = NOW()");
        if let Some(assignee_id) = update.assignee_id {
            builder.push(", assignee_id = ").push_bind(assignee_id);
        }
        if let Some(status) = update.status {
            builder.push(", status = ").push_bind(status);
        }
        builder.push(" WHERE id = ").push_bind(id);
        match update.precondition {
            WritePrecondition::Any => {}
            WritePrecondition::Unassigned => {
                builder.push(" AND assignee_id IS NULL");
            }
            WritePrecondition::AssignedTo(owner) => {
                builder.push(" AND assignee_id = ").push_bind(owner);
            }
        }

        let affected = builder
            .build()
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to update complaint"))?
            .rows_affected();

        if affected == 0 {
            let current = Self::load_in_tx(&mut tx, id)
                .await
                .map_err(db_error("Failed to reload complaint"))?;
            tx.rollback()
                .await
                .map_err(db_error("Failed to roll back complaint update"))?;
            return Ok(match current {
                Some(complaint) => WriteOutcome::Rejected(complaint),
                None => WriteOutcome::Missing,
            });
        }

        if let Some(note) = &update.note {
            sqlx::query(
                r#"
                INSERT INTO complaint_notes (complaint_id, message, author_id, created_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(id)
            .bind(&note.message)
            .bind(note.author_id)
            .bind(note.created_at)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to append complaint note"))?;
        }

        let complaint = Self::load_in_tx(&mut tx, id)
            .await
            .map_err(db_error("Failed to reload complaint"))?
            .ok_or_else(|| AppError::Internal(format!("Complaint {} vanished mid-update", id)))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit complaint update"))?;

        Ok(WriteOutcome::Applied(complaint))
    }

    async fn set_assignee_where(
        &self,
        filter: &ComplaintFilter,
        assignee_id: Option<Uuid>,
    ) -> Result<u64> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE complaints SET assignee_id = ");
        builder.push_bind(assignee_id).push(", updated_at = NOW()");
        push_filter(&mut builder, filter);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to bulk update complaint assignees"))?;

        Ok(result.rows_affected())
    }
}

/// Account directory backed by the `users` table
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn get(&self, id: Uuid) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to get user"))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find user by email"))
    }

    async fn list_faculty(&self) -> Result<Vec<FacultyProfile>> {
        sqlx::query_as::<_, FacultyProfile>(
            r#"
            SELECT id, name, email, department
            FROM users
            WHERE role = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(UserRole::Faculty)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list faculty"))
    }

    async fn create(&self, data: NewUser) -> Result<User> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, name, email, role, department)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(&data.name)
        .bind(&data.email)
        .bind(data.role)
        .bind(&data.department)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                AppError::Conflict(format!("User '{}' already exists", data.email))
            } else {
                db_error("Failed to create user")(e)
            }
        })
    }

    async fn remove_faculty_if_idle(&self, id: Uuid) -> Result<FacultyRemoval> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin faculty removal"))?;

        // Row lock conflicts with the key-share lock taken by the assignee foreign key,
        // so no complaint can be newly assigned to this account until we commit.
        let locked: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM users WHERE id = $1 AND role = $2 FOR UPDATE")
                .bind(id)
                .bind(UserRole::Faculty)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error("Failed to lock faculty account"))?;

        if locked.is_none() {
            return Err(AppError::NotFound(format!("Faculty {} not found", id)));
        }

        let pending: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM complaints WHERE assignee_id = $1 AND status::text = ANY($2)",
        )
        .bind(id)
        .bind(status_names(&ComplaintStatus::ACTIVE))
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to count pending complaints"))?;

        if pending > 0 {
            tx.rollback()
                .await
                .map_err(db_error("Failed to roll back faculty removal"))?;
            return Ok(FacultyRemoval::Blocked { pending });
        }

        let unassigned = sqlx::query(
            "UPDATE complaints SET assignee_id = NULL, updated_at = NOW() WHERE assignee_id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to unassign resolved complaints"))?
        .rows_affected();

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete faculty account"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit faculty removal"))?;

        Ok(FacultyRemoval::Removed { unassigned })
    }
}
