//! Repository for the `tracks` table.

use sqlx::PgPool;

use donut_core::types::DbId;

use crate::models::track::{CreateTrack, ReorderEntry, Track, TrackWithCurrentVersion, UpdateTrack};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, title, order_index, status, created_by, created_at";

/// Provides CRUD and ordering operations for tracks.
pub struct TrackRepo;

impl TrackRepo {
    /// Insert a new track row.
    pub async fn create(pool: &PgPool, input: &CreateTrack) -> Result<Track, sqlx::Error> {
        let query = format!(
            "INSERT INTO tracks (project_id, title, order_index, created_by)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(input.order_index)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a track by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Track>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks WHERE id = $1");
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Next append-position order index for a project: 1 + max existing,
    /// or 0 when the project has no tracks.
    pub async fn next_order_index(pool: &PgPool, project_id: DbId) -> Result<i32, sqlx::Error> {
        let row: (i32,) = sqlx::query_as(
            "SELECT COALESCE(MAX(order_index) + 1, 0) FROM tracks WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// List a project's tracks with their current version and its
    /// uploader, in display order. Ties on `order_index` break by id.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<TrackWithCurrentVersion>, sqlx::Error> {
        sqlx::query_as::<_, TrackWithCurrentVersion>(
            "SELECT t.id, t.project_id, t.title, t.order_index, t.status, t.created_by,
                    t.created_at,
                    v.id AS current_version_id,
                    v.version_number AS current_version_number,
                    v.file_path AS current_file_path,
                    v.file_type AS current_file_type,
                    v.duration_secs AS current_duration_secs,
                    v.uploaded_by AS current_uploaded_by,
                    u.username AS current_uploader_username
             FROM tracks t
             LEFT JOIN track_versions v ON v.track_id = t.id AND v.is_current
             LEFT JOIN users u ON u.id = v.uploaded_by
             WHERE t.project_id = $1
             ORDER BY t.order_index, t.id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Update a track's title and/or status.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTrack,
    ) -> Result<Option<Track>, sqlx::Error> {
        let query = format!(
            "UPDATE tracks SET
                title = COALESCE($2, title),
                status = COALESCE($3, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.status)
            .fetch_optional(pool)
            .await
    }

    /// Apply a batch of order-index assignments in one transaction.
    ///
    /// Entries referencing tracks that do not exist (or belong to another
    /// project) are silently skipped. No contiguity or uniqueness checks.
    pub async fn reorder(
        pool: &PgPool,
        project_id: DbId,
        entries: &[ReorderEntry],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for entry in entries {
            sqlx::query(
                "UPDATE tracks SET order_index = $3 WHERE id = $1 AND project_id = $2",
            )
            .bind(entry.track_id)
            .bind(project_id)
            .bind(entry.order_index)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Delete a track. Its versions and track-scoped hit-list items go
    /// with it via FK cascades. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tracks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
