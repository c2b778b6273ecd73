//! Repository for the `projects` table.

use sqlx::PgPool;

use donut_core::types::DbId;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, artist_name, description, artwork_url, status, \
    created_by, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project owned by `created_by`.
    pub async fn create(
        pool: &PgPool,
        created_by: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, artist_name, description, artwork_url, created_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.artist_name)
            .bind(&input.description)
            .bind(&input.artwork_url)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a project by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every project the user created or actively collaborates on,
    /// most recent first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects p
             WHERE p.created_by = $1
                OR EXISTS (
                    SELECT 1 FROM collaborators c
                    WHERE c.project_id = p.id
                      AND c.user_id = $1
                      AND c.status = 'active'
                )
             ORDER BY p.created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                artist_name = COALESCE($3, artist_name),
                description = COALESCE($4, description),
                artwork_url = COALESCE($5, artwork_url),
                status = COALESCE($6, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.artist_name)
            .bind(&input.description)
            .bind(&input.artwork_url)
            .bind(input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project. Tracks, versions, collaborators, invitations, and
    /// hit-list items go with it via FK cascades. Returns `true` if a row
    /// was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
