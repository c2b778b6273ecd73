//! Handlers for the invitation workflow.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use donut_core::error::CoreError;
use donut_core::roles::Role;
use donut_core::types::DbId;
use donut_db::models::invitation::{CreateInvitation, Invitation, InvitationWithContext};
use donut_db::repositories::{CollaboratorRepo, InvitationRepo, UserRepo};
use serde::Deserialize;

use crate::access;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /invitations/send`.
#[derive(Debug, Deserialize)]
pub struct SendInvitationRequest {
    pub project_id: DbId,
    pub invited_user_id: DbId,
    pub message: Option<String>,
}

/// Request body for `POST /invitations/{id}/respond`.
#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub accept: bool,
}

/// POST /api/v1/invitations/send
///
/// Invite a user to a project. Rejected when the target does not exist,
/// is the caller, is already an active collaborator, or already has a
/// pending invitation for the project.
pub async fn send(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<SendInvitationRequest>,
) -> AppResult<(StatusCode, Json<Invitation>)> {
    let project = access::require_member(&state.pool, input.project_id, auth_user.user_id).await?;

    let invited = UserRepo::find_by_id(&state.pool, input.invited_user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.invited_user_id,
        }))?;

    if invited.id == auth_user.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot invite yourself".into(),
        )));
    }

    if invited.id == project.created_by {
        return Err(AppError::Core(CoreError::Validation(
            "The project creator is already a member".into(),
        )));
    }

    if CollaboratorRepo::is_active_member(&state.pool, input.project_id, invited.id).await? {
        return Err(AppError::Core(CoreError::Validation(
            "User is already an active collaborator on this project".into(),
        )));
    }

    if InvitationRepo::find_pending(&state.pool, input.project_id, invited.id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Validation(
            "User already has a pending invitation for this project".into(),
        )));
    }

    let invitation = InvitationRepo::create(
        &state.pool,
        &CreateInvitation {
            project_id: input.project_id,
            invited_user_id: invited.id,
            invited_by: auth_user.user_id,
            message: input.message,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(invitation)))
}

/// GET /api/v1/invitations
///
/// List the caller's pending invitations.
pub async fn list_mine(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<InvitationWithContext>>> {
    let invitations = InvitationRepo::list_pending_for_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(invitations))
}

/// GET /api/v1/projects/{id}/invitations
///
/// List a project's pending invitations.
pub async fn list_for_project(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<InvitationWithContext>>> {
    access::require_member(&state.pool, project_id, auth_user.user_id).await?;
    let invitations = InvitationRepo::list_pending_for_project(&state.pool, project_id).await?;
    Ok(Json(invitations))
}

/// POST /api/v1/invitations/{id}/respond
///
/// Accept or decline a pending invitation. Only the invited user may
/// respond. Accepting creates (or reactivates) the collaborator row in
/// the same transaction.
pub async fn respond(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<RespondRequest>,
) -> AppResult<Json<Invitation>> {
    let invitation = InvitationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invitation",
            id,
        }))?;

    if invitation.invited_user_id != auth_user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the invited user may respond to this invitation".into(),
        )));
    }

    let result = if input.accept {
        InvitationRepo::accept(&state.pool, id, Role::default()).await?
    } else {
        InvitationRepo::decline(&state.pool, id).await?
    };

    let invitation = result.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Invitation has already been responded to".into(),
        ))
    })?;

    Ok(Json(invitation))
}

/// DELETE /api/v1/invitations/{id}/cancel
///
/// Withdraw a pending invitation. Only the inviter or the project
/// creator may cancel.
pub async fn cancel(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Invitation>> {
    let invitation = InvitationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invitation",
            id,
        }))?;

    let project = access::load_project(&state.pool, invitation.project_id).await?;
    if invitation.invited_by != auth_user.user_id && project.created_by != auth_user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the inviter or the project creator may cancel this invitation".into(),
        )));
    }

    let invitation = InvitationRepo::cancel(&state.pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Invitation has already been responded to".into(),
        ))
    })?;

    Ok(Json(invitation))
}
