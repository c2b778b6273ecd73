//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use donut_core::error::CoreError;
use donut_core::types::DbId;
use donut_db::models::project::{CreateProject, Project, UpdateProject};
use donut_db::repositories::{ProjectRepo, TrackRepo, TrackVersionRepo};

use crate::access;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/projects
///
/// Create a project. The caller becomes its creator and needs no
/// collaborator row to act on it.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Project title must not be empty".into(),
        )));
    }

    let project = ProjectRepo::create(&state.pool, auth_user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
///
/// List projects the caller created or actively collaborates on.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = access::require_member(&state.pool, id, auth_user.user_id).await?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    access::require_member(&state.pool, id, auth_user.user_id).await?;

    if let Some(title) = &input.title {
        if title.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Project title must not be empty".into(),
            )));
        }
    }

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Creator only. Audio blobs are removed best-effort before the row
/// delete; the database cascades tracks, versions, collaborators,
/// invitations, and hit-list items.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    access::require_creator(&state.pool, id, auth_user.user_id).await?;

    let tracks = TrackRepo::list_by_project(&state.pool, id).await?;
    for track in &tracks {
        let versions = TrackVersionRepo::list_by_track(&state.pool, track.id).await?;
        for version in &versions {
            state.storage.delete(&version.file_path).await;
        }
    }

    ProjectRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
