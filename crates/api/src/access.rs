//! Project access checks.
//!
//! Single authorization rule for everything under a project: the caller
//! has access iff they created the project or hold an active collaborator
//! row on it. Evaluated fresh on every request; the creator never has a
//! collaborator row of their own.

use donut_core::error::CoreError;
use donut_core::types::DbId;
use donut_db::models::project::Project;
use donut_db::repositories::{CollaboratorRepo, ProjectRepo};
use donut_db::DbPool;

use crate::error::AppError;

/// Load a project or produce a 404.
pub async fn load_project(pool: &DbPool, project_id: DbId) -> Result<Project, AppError> {
    ProjectRepo::find_by_id(pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))
}

/// Load the project and require that `user_id` may act on it.
///
/// Returns the project on success so callers get their existence check and
/// permission check in one call, in that order (404 before 403).
pub async fn require_member(
    pool: &DbPool,
    project_id: DbId,
    user_id: DbId,
) -> Result<Project, AppError> {
    let project = load_project(pool, project_id).await?;

    if project.created_by == user_id
        || CollaboratorRepo::is_active_member(pool, project_id, user_id).await?
    {
        return Ok(project);
    }

    Err(AppError::Core(CoreError::Forbidden(
        "You do not have access to this project".into(),
    )))
}

/// Like [`require_member`], but additionally requires the caller to be the
/// project creator. Used for project deletion.
pub async fn require_creator(
    pool: &DbPool,
    project_id: DbId,
    user_id: DbId,
) -> Result<Project, AppError> {
    let project = load_project(pool, project_id).await?;

    if project.created_by != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project creator may do this".into(),
        )));
    }

    Ok(project)
}
