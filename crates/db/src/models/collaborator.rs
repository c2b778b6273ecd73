//! Collaborator membership model, DTOs, and read models.

use donut_core::roles::{CollaboratorStatus, Role};
use donut_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `collaborators` table. At most one row exists per
/// (project, user) pair; removal is a soft status transition.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Collaborator {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub role: Role,
    pub status: CollaboratorStatus,
    pub joined_at: Timestamp,
    pub added_by: DbId,
    pub removed_at: Option<Timestamp>,
    pub removed_by: Option<DbId>,
}

/// Request body for adding a collaborator directly (bypassing invitation).
#[derive(Debug, Clone, Deserialize)]
pub struct AddCollaboratorRequest {
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

/// Read model for collaborator listings: membership plus user identity.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CollaboratorWithUser {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub status: CollaboratorStatus,
    pub joined_at: Timestamp,
    pub added_by: DbId,
}
