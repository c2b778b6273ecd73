//! Repository for the `track_versions` table.
//!
//! Every operation that touches the `is_current` flag runs as a single
//! transaction so the "exactly one current version per non-empty track"
//! invariant holds at every commit point; the partial unique index
//! `uq_track_versions_current` rejects any interleaving that would
//! produce two current rows.

use sqlx::PgPool;

use donut_core::types::DbId;

use crate::models::track_version::{CreateTrackVersion, TrackVersion, TrackVersionWithUploader};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, track_id, version_number, file_path, file_type, duration_secs, \
    uploaded_by, uploaded_at, is_current, notes";

/// Provides version-management operations for track versions.
pub struct TrackVersionRepo;

impl TrackVersionRepo {
    /// Insert a new version as the track's current one, un-marking any
    /// previous current version and auto-assigning the next version
    /// number (max existing + 1, or 1 if none) in the same transaction.
    pub async fn create_as_current(
        pool: &PgPool,
        input: &CreateTrackVersion,
    ) -> Result<TrackVersion, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("UPDATE track_versions SET is_current = false WHERE track_id = $1 AND is_current")
            .bind(input.track_id)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO track_versions
                (track_id, version_number, file_path, file_type, duration_secs, uploaded_by, is_current, notes)
             VALUES (
                $1,
                (SELECT COALESCE(MAX(version_number), 0) + 1 FROM track_versions WHERE track_id = $1),
                $2, $3, $4, $5, true, $6
             )
             RETURNING {COLUMNS}"
        );
        let version = sqlx::query_as::<_, TrackVersion>(&query)
            .bind(input.track_id)
            .bind(&input.file_path)
            .bind(&input.file_type)
            .bind(input.duration_secs)
            .bind(input.uploaded_by)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(version)
    }

    /// Find a version by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TrackVersion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM track_versions WHERE id = $1");
        sqlx::query_as::<_, TrackVersion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all versions for a track, newest version number first.
    pub async fn list_by_track(
        pool: &PgPool,
        track_id: DbId,
    ) -> Result<Vec<TrackVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM track_versions
             WHERE track_id = $1
             ORDER BY version_number DESC"
        );
        sqlx::query_as::<_, TrackVersion>(&query)
            .bind(track_id)
            .fetch_all(pool)
            .await
    }

    /// List all versions for a track with uploader usernames, newest
    /// version number first.
    pub async fn list_by_track_with_uploader(
        pool: &PgPool,
        track_id: DbId,
    ) -> Result<Vec<TrackVersionWithUploader>, sqlx::Error> {
        sqlx::query_as::<_, TrackVersionWithUploader>(
            "SELECT v.id, v.track_id, v.version_number, v.file_path, v.file_type,
                    v.duration_secs, v.uploaded_by, u.username AS uploader_username,
                    v.uploaded_at, v.is_current, v.notes
             FROM track_versions v
             JOIN users u ON u.id = v.uploaded_by
             WHERE v.track_id = $1
             ORDER BY v.version_number DESC",
        )
        .bind(track_id)
        .fetch_all(pool)
        .await
    }

    /// Count the versions a track currently has.
    pub async fn count_for_track(pool: &PgPool, track_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM track_versions WHERE track_id = $1")
                .bind(track_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// Mark a version as the track's current one, un-marking all
    /// siblings in the same transaction. Idempotent.
    ///
    /// Returns `None` if `version_id` does not exist for the given
    /// `track_id`.
    pub async fn set_current(
        pool: &PgPool,
        track_id: DbId,
        version_id: DbId,
    ) -> Result<Option<TrackVersion>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("UPDATE track_versions SET is_current = false WHERE track_id = $1 AND is_current")
            .bind(track_id)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "UPDATE track_versions SET is_current = true
             WHERE id = $1 AND track_id = $2
             RETURNING {COLUMNS}"
        );
        let result = sqlx::query_as::<_, TrackVersion>(&query)
            .bind(version_id)
            .bind(track_id)
            .fetch_optional(&mut *tx)
            .await?;

        // The target does not belong to this track: undo the clearing
        // pass so the track keeps its current version.
        let Some(version) = result else {
            tx.rollback().await?;
            return Ok(None);
        };

        tx.commit().await?;
        Ok(Some(version))
    }

    /// Delete a version and, if it was the current one, promote the
    /// remaining version with the highest version number -- both in one
    /// transaction. Returns the deleted row, or `None` if `version_id`
    /// does not exist for the given `track_id`.
    ///
    /// Callers must refuse to delete a track's only version before
    /// reaching here; this method assumes a sibling exists to promote.
    pub async fn delete_and_promote(
        pool: &PgPool,
        track_id: DbId,
        version_id: DbId,
    ) -> Result<Option<TrackVersion>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "DELETE FROM track_versions WHERE id = $1 AND track_id = $2 RETURNING {COLUMNS}"
        );
        let deleted = sqlx::query_as::<_, TrackVersion>(&query)
            .bind(version_id)
            .bind(track_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(deleted) = deleted else {
            tx.rollback().await?;
            return Ok(None);
        };

        if deleted.is_current {
            sqlx::query(
                "UPDATE track_versions SET is_current = true
                 WHERE id = (
                     SELECT id FROM track_versions
                     WHERE track_id = $1
                     ORDER BY version_number DESC
                     LIMIT 1
                 )",
            )
            .bind(track_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Some(deleted))
    }
}
