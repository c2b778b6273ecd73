//! Project (album) entity model and DTOs.

use donut_core::roles::WorkStatus;
use donut_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub artist_name: Option<String>,
    pub description: Option<String>,
    pub artwork_url: Option<String>,
    pub status: WorkStatus,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub artist_name: Option<String>,
    pub description: Option<String>,
    pub artwork_url: Option<String>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub artist_name: Option<String>,
    pub description: Option<String>,
    pub artwork_url: Option<String>,
    pub status: Option<WorkStatus>,
}
