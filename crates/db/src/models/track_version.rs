//! Track version entity model, DTOs, and read models.

use donut_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `track_versions` table. Versions are immutable once
/// uploaded apart from the `is_current` flag.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrackVersion {
    pub id: DbId,
    pub track_id: DbId,
    pub version_number: i32,
    pub file_path: String,
    pub file_type: String,
    pub duration_secs: Option<f64>,
    pub uploaded_by: DbId,
    pub uploaded_at: Timestamp,
    pub is_current: bool,
    pub notes: Option<String>,
}

/// DTO for inserting a version row. The version number and current flag
/// are assigned inside the repository transaction.
#[derive(Debug, Clone)]
pub struct CreateTrackVersion {
    pub track_id: DbId,
    pub file_path: String,
    pub file_type: String,
    pub duration_secs: Option<f64>,
    pub uploaded_by: DbId,
    pub notes: Option<String>,
}

/// Read model for version listings: the version plus its uploader's
/// username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrackVersionWithUploader {
    pub id: DbId,
    pub track_id: DbId,
    pub version_number: i32,
    pub file_path: String,
    pub file_type: String,
    pub duration_secs: Option<f64>,
    pub uploaded_by: DbId,
    pub uploader_username: String,
    pub uploaded_at: Timestamp,
    pub is_current: bool,
    pub notes: Option<String>,
}
