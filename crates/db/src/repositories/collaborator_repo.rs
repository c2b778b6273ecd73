//! Repository for the `collaborators` table.
//!
//! The unique (project_id, user_id) index means membership changes are
//! row transitions, never inserts of a second row: removal sets the
//! status to `removed`, re-adding reactivates the existing row.

use sqlx::PgPool;

use donut_core::roles::Role;
use donut_core::types::DbId;

use crate::models::collaborator::{Collaborator, CollaboratorWithUser};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, user_id, role, status, joined_at, added_by, \
    removed_at, removed_by";

/// Provides membership operations for project collaborators.
pub struct CollaboratorRepo;

impl CollaboratorRepo {
    /// Insert a new active collaborator row.
    pub async fn insert_active(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
        role: Role,
        added_by: DbId,
    ) -> Result<Collaborator, sqlx::Error> {
        let query = format!(
            "INSERT INTO collaborators (project_id, user_id, role, status, added_by)
             VALUES ($1, $2, $3, 'active', $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collaborator>(&query)
            .bind(project_id)
            .bind(user_id)
            .bind(role)
            .bind(added_by)
            .fetch_one(pool)
            .await
    }

    /// Find a collaborator row by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Collaborator>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM collaborators WHERE id = $1");
        sqlx::query_as::<_, Collaborator>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the (at most one) collaborator row for a (project, user)
    /// pair, regardless of status.
    pub async fn find_by_project_and_user(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Collaborator>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collaborators WHERE project_id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, Collaborator>(&query)
            .bind(project_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// True iff the user holds an active collaborator row on the project.
    pub async fn is_active_member(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                 SELECT 1 FROM collaborators
                 WHERE project_id = $1 AND user_id = $2 AND status = 'active'
             )",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// List a project's active collaborators with user identity, oldest
    /// membership first.
    pub async fn list_active_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<CollaboratorWithUser>, sqlx::Error> {
        sqlx::query_as::<_, CollaboratorWithUser>(
            "SELECT c.id, c.project_id, c.user_id, u.username, u.email,
                    c.role, c.status, c.joined_at, c.added_by
             FROM collaborators c
             JOIN users u ON u.id = c.user_id
             WHERE c.project_id = $1 AND c.status = 'active'
             ORDER BY c.joined_at, c.id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Reactivate a previously removed (or reserved-inactive) row:
    /// overwrite role, joined_at and added_by, clear the removal fields.
    pub async fn reactivate(
        pool: &PgPool,
        id: DbId,
        role: Role,
        added_by: DbId,
    ) -> Result<Option<Collaborator>, sqlx::Error> {
        let query = format!(
            "UPDATE collaborators SET
                role = $2,
                status = 'active',
                joined_at = NOW(),
                added_by = $3,
                removed_at = NULL,
                removed_by = NULL
             WHERE id = $1 AND status <> 'active'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collaborator>(&query)
            .bind(id)
            .bind(role)
            .bind(added_by)
            .fetch_optional(pool)
            .await
    }

    /// Soft-remove a collaborator: status -> removed, removal fields
    /// populated, row retained for history and reactivation. Returns
    /// `true` if an active row was transitioned.
    pub async fn remove(pool: &PgPool, id: DbId, removed_by: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE collaborators SET
                status = 'removed',
                removed_at = NOW(),
                removed_by = $2
             WHERE id = $1 AND status = 'active'",
        )
        .bind(id)
        .bind(removed_by)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
