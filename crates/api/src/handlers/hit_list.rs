//! Handlers for hit-list items and their comments.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use donut_core::error::CoreError;
use donut_core::types::DbId;
use donut_db::models::hit_list::{
    CreateHitListItem, HitListComment, HitListCommentWithUser, HitListItem, UpdateHitListItem,
};
use donut_db::repositories::{HitListRepo, TrackRepo};
use serde::Deserialize;

use crate::access;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for the item listing.
#[derive(Debug, Deserialize)]
pub struct HitListQuery {
    /// Narrow the listing to one track's items.
    pub track_id: Option<DbId>,
}

/// Request body for `POST /hit-list/{item_id}/comments`.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub body: String,
}

/// POST /api/v1/projects/{id}/hit-list
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateHitListItem>,
) -> AppResult<(StatusCode, Json<HitListItem>)> {
    access::require_member(&state.pool, project_id, auth_user.user_id).await?;

    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Item title must not be empty".into(),
        )));
    }

    // A track-scoped item must reference a track of the same project.
    if let Some(track_id) = input.track_id {
        TrackRepo::find_by_id(&state.pool, track_id)
            .await?
            .filter(|t| t.project_id == project_id)
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Track",
                id: track_id,
            }))?;
    }

    let item = HitListRepo::create(&state.pool, project_id, auth_user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/v1/projects/{id}/hit-list
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
    Query(query): Query<HitListQuery>,
) -> AppResult<Json<Vec<HitListItem>>> {
    access::require_member(&state.pool, project_id, auth_user.user_id).await?;
    let items = HitListRepo::list_by_project(&state.pool, project_id, query.track_id).await?;
    Ok(Json(items))
}

/// PUT /api/v1/hit-list/{id}
///
/// Creator-only mutation.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateHitListItem>,
) -> AppResult<Json<HitListItem>> {
    let item = find_item(&state, id).await?;
    require_item_creator(&item, auth_user.user_id)?;

    if let Some(title) = &input.title {
        if title.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Item title must not be empty".into(),
            )));
        }
    }

    let item = HitListRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "HitListItem",
            id,
        }))?;
    Ok(Json(item))
}

/// DELETE /api/v1/hit-list/{id}
///
/// Creator-only; comments cascade.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let item = find_item(&state, id).await?;
    require_item_creator(&item, auth_user.user_id)?;

    HitListRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/hit-list/{item_id}/comments
///
/// Any project member may comment.
pub async fn add_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(item_id): Path<DbId>,
    Json(input): Json<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<HitListComment>)> {
    let item = find_item(&state, item_id).await?;
    access::require_member(&state.pool, item.project_id, auth_user.user_id).await?;

    if input.body.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Comment body must not be empty".into(),
        )));
    }

    let comment =
        HitListRepo::add_comment(&state.pool, item_id, auth_user.user_id, input.body.trim())
            .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /api/v1/hit-list/{item_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(item_id): Path<DbId>,
) -> AppResult<Json<Vec<HitListCommentWithUser>>> {
    let item = find_item(&state, item_id).await?;
    access::require_member(&state.pool, item.project_id, auth_user.user_id).await?;

    let comments = HitListRepo::list_comments(&state.pool, item_id).await?;
    Ok(Json(comments))
}

/// DELETE /api/v1/hit-list/{item_id}/comments/{id}
///
/// Comment-author-only.
pub async fn delete_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((item_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let comment = HitListRepo::find_comment(&state.pool, id)
        .await?
        .filter(|c| c.item_id == item_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "HitListComment",
            id,
        }))?;

    if comment.user_id != auth_user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the comment author may delete it".into(),
        )));
    }

    HitListRepo::delete_comment(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Look up a hit-list item or produce a 404.
async fn find_item(state: &AppState, id: DbId) -> Result<HitListItem, AppError> {
    HitListRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "HitListItem",
            id,
        }))
}

/// Only the item's creator may mutate it.
fn require_item_creator(item: &HitListItem, user_id: DbId) -> Result<(), AppError> {
    if item.created_by != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the item creator may modify it".into(),
        )));
    }
    Ok(())
}
