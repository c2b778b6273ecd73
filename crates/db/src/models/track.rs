//! Track entity model, DTOs, and read models.

use donut_core::roles::WorkStatus;
use donut_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A track row from the `tracks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Track {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub order_index: i32,
    pub status: WorkStatus,
    pub created_by: DbId,
    pub created_at: Timestamp,
}

/// DTO for inserting a track row. `order_index` is resolved by the caller
/// before insert (append-to-end when the upload omits it).
#[derive(Debug, Clone)]
pub struct CreateTrack {
    pub project_id: DbId,
    pub title: String,
    pub order_index: i32,
    pub created_by: DbId,
}

/// DTO for updating a track. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTrack {
    pub title: Option<String>,
    pub status: Option<WorkStatus>,
}

/// One entry of a reorder request: assign `order_index` to `track_id`.
///
/// Entries referencing unknown tracks are silently skipped; duplicate
/// indices are permitted and break by stable `(order_index, id)` order.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderEntry {
    pub track_id: DbId,
    pub order_index: i32,
}

/// Flat read model for project track listings: the track plus its current
/// version (if any) and the current version's uploader username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrackWithCurrentVersion {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub order_index: i32,
    pub status: WorkStatus,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub current_version_id: Option<DbId>,
    pub current_version_number: Option<i32>,
    pub current_file_path: Option<String>,
    pub current_file_type: Option<String>,
    pub current_duration_secs: Option<f64>,
    pub current_uploaded_by: Option<DbId>,
    pub current_uploader_username: Option<String>,
}
