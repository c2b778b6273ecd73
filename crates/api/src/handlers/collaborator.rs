//! Handlers for project collaborators.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use donut_core::error::CoreError;
use donut_core::roles::CollaboratorStatus;
use donut_core::types::DbId;
use donut_db::models::collaborator::{AddCollaboratorRequest, Collaborator, CollaboratorWithUser};
use donut_db::repositories::{CollaboratorRepo, UserRepo};

use crate::access;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/collaborators
///
/// List the project's active collaborators with usernames and emails.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<CollaboratorWithUser>>> {
    access::require_member(&state.pool, project_id, auth_user.user_id).await?;
    let collaborators = CollaboratorRepo::list_active_by_project(&state.pool, project_id).await?;
    Ok(Json(collaborators))
}

/// POST /api/v1/projects/{id}/collaborators
///
/// Add a collaborator directly by email, bypassing the invitation flow.
/// A removed membership is reactivated with the requested role; an active
/// one is rejected.
pub async fn add(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<AddCollaboratorRequest>,
) -> AppResult<(StatusCode, Json<Collaborator>)> {
    let project = access::require_member(&state.pool, project_id, auth_user.user_id).await?;

    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No user found with email {}", input.email.trim()))
        })?;

    // The creator is a member by definition and never holds a row.
    if user.id == project.created_by {
        return Err(AppError::Core(CoreError::Validation(
            "The project creator is already a member".into(),
        )));
    }

    let existing = CollaboratorRepo::find_by_project_and_user(&state.pool, project_id, user.id)
        .await?;

    let collaborator = match existing {
        Some(row) if row.status == CollaboratorStatus::Active => {
            return Err(AppError::Core(CoreError::Validation(
                "User is already an active collaborator on this project".into(),
            )));
        }
        Some(row) => CollaboratorRepo::reactivate(&state.pool, row.id, input.role, auth_user.user_id)
            .await?
            .ok_or_else(|| {
                // Lost a race against a concurrent reactivation.
                AppError::Core(CoreError::Conflict(
                    "User is already an active collaborator on this project".into(),
                ))
            })?,
        None => {
            CollaboratorRepo::insert_active(
                &state.pool,
                project_id,
                user.id,
                input.role,
                auth_user.user_id,
            )
            .await?
        }
    };

    Ok((StatusCode::CREATED, Json(collaborator)))
}

/// DELETE /api/v1/projects/{id}/collaborators/{collaborator_id}
///
/// Soft-remove a collaborator. Any active member (or the collaborator
/// themself) may remove; the project creator has no row to remove.
pub async fn remove(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((project_id, collaborator_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    access::require_member(&state.pool, project_id, auth_user.user_id).await?;

    let row = CollaboratorRepo::find_by_id(&state.pool, collaborator_id)
        .await?
        .filter(|c| c.project_id == project_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Collaborator",
            id: collaborator_id,
        }))?;

    if row.status != CollaboratorStatus::Active {
        return Err(AppError::Core(CoreError::Validation(
            "Collaborator is not active on this project".into(),
        )));
    }

    CollaboratorRepo::remove(&state.pool, row.id, auth_user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
