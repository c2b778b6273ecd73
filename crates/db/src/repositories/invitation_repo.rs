//! Repository for the `invitations` table.
//!
//! An invitation transitions exactly once from `pending` to one of the
//! terminal states; the `AND status = 'pending'` guard on every
//! transition makes double-responses lose at the store level rather than
//! relying on a read-then-write check alone.

use sqlx::PgPool;

use donut_core::roles::Role;
use donut_core::types::DbId;

use crate::models::invitation::{CreateInvitation, Invitation, InvitationWithContext};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, invited_user_id, invited_by, status, message, \
    created_at, responded_at";

/// Join used by the listing read models.
const CONTEXT_SELECT: &str = "SELECT i.id, i.project_id, p.title AS project_title, \
    i.invited_user_id, iu.username AS invited_username, \
    i.invited_by, bu.username AS inviter_username, \
    i.status, i.message, i.created_at, i.responded_at \
    FROM invitations i \
    JOIN projects p ON p.id = i.project_id \
    JOIN users iu ON iu.id = i.invited_user_id \
    JOIN users bu ON bu.id = i.invited_by";

/// Provides lifecycle operations for invitations.
pub struct InvitationRepo;

impl InvitationRepo {
    /// Insert a new pending invitation.
    pub async fn create(
        pool: &PgPool,
        input: &CreateInvitation,
    ) -> Result<Invitation, sqlx::Error> {
        let query = format!(
            "INSERT INTO invitations (project_id, invited_user_id, invited_by, message)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invitation>(&query)
            .bind(input.project_id)
            .bind(input.invited_user_id)
            .bind(input.invited_by)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    /// Find an invitation by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Invitation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invitations WHERE id = $1");
        sqlx::query_as::<_, Invitation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the pending invitation for a (project, invited user) pair,
    /// if one exists. At most one can be pending at a time.
    pub async fn find_pending(
        pool: &PgPool,
        project_id: DbId,
        invited_user_id: DbId,
    ) -> Result<Option<Invitation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invitations
             WHERE project_id = $1 AND invited_user_id = $2 AND status = 'pending'"
        );
        sqlx::query_as::<_, Invitation>(&query)
            .bind(project_id)
            .bind(invited_user_id)
            .fetch_optional(pool)
            .await
    }

    /// List the caller's pending invitations, newest first.
    pub async fn list_pending_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<InvitationWithContext>, sqlx::Error> {
        let query = format!(
            "{CONTEXT_SELECT} WHERE i.invited_user_id = $1 AND i.status = 'pending'
             ORDER BY i.created_at DESC"
        );
        sqlx::query_as::<_, InvitationWithContext>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List a project's pending invitations, newest first.
    pub async fn list_pending_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<InvitationWithContext>, sqlx::Error> {
        let query = format!(
            "{CONTEXT_SELECT} WHERE i.project_id = $1 AND i.status = 'pending'
             ORDER BY i.created_at DESC"
        );
        sqlx::query_as::<_, InvitationWithContext>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Accept a pending invitation and ensure exactly one active
    /// collaborator row for (project, invited user), in one transaction.
    ///
    /// The collaborator side is a conditional upsert: a missing row is
    /// inserted, a removed row is reactivated, and an already-active row
    /// (the anticipated accept/direct-add race) is left untouched.
    /// Returns the updated invitation, or `None` if it was no longer
    /// pending.
    pub async fn accept(
        pool: &PgPool,
        id: DbId,
        default_role: Role,
    ) -> Result<Option<Invitation>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE invitations SET status = 'accepted', responded_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        let invitation = sqlx::query_as::<_, Invitation>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(invitation) = invitation else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO collaborators (project_id, user_id, role, status, added_by)
             VALUES ($1, $2, $3, 'active', $4)
             ON CONFLICT (project_id, user_id) DO UPDATE SET
                role = EXCLUDED.role,
                status = 'active',
                joined_at = NOW(),
                added_by = EXCLUDED.added_by,
                removed_at = NULL,
                removed_by = NULL
             WHERE collaborators.status <> 'active'",
        )
        .bind(invitation.project_id)
        .bind(invitation.invited_user_id)
        .bind(default_role)
        .bind(invitation.invited_by)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(invitation))
    }

    /// Decline a pending invitation. Returns the updated invitation, or
    /// `None` if it was no longer pending.
    pub async fn decline(pool: &PgPool, id: DbId) -> Result<Option<Invitation>, sqlx::Error> {
        let query = format!(
            "UPDATE invitations SET status = 'declined', responded_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invitation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Cancel a pending invitation. Returns the updated invitation, or
    /// `None` if it was no longer pending.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<Invitation>, sqlx::Error> {
        let query = format!(
            "UPDATE invitations SET status = 'cancelled', responded_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invitation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
