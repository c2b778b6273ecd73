//! Invitation entity model, DTOs, and read models.

use donut_core::roles::InvitationStatus;
use donut_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `invitations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invitation {
    pub id: DbId,
    pub project_id: DbId,
    pub invited_user_id: DbId,
    pub invited_by: DbId,
    pub status: InvitationStatus,
    pub message: Option<String>,
    pub created_at: Timestamp,
    pub responded_at: Option<Timestamp>,
}

/// DTO for creating a pending invitation.
#[derive(Debug, Clone)]
pub struct CreateInvitation {
    pub project_id: DbId,
    pub invited_user_id: DbId,
    pub invited_by: DbId,
    pub message: Option<String>,
}

/// Read model for invitation listings: the invitation plus project title
/// and the usernames on both ends.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InvitationWithContext {
    pub id: DbId,
    pub project_id: DbId,
    pub project_title: String,
    pub invited_user_id: DbId,
    pub invited_username: String,
    pub invited_by: DbId,
    pub inviter_username: String,
    pub status: InvitationStatus,
    pub message: Option<String>,
    pub created_at: Timestamp,
    pub responded_at: Option<Timestamp>,
}
