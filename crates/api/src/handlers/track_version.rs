//! Handlers for track versions, nested under `/tracks/{track_id}/versions`.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use donut_core::audio;
use donut_core::error::CoreError;
use donut_core::types::DbId;
use donut_db::models::track_version::{TrackVersion, TrackVersionWithUploader};
use donut_db::repositories::TrackVersionRepo;

use crate::access;
use crate::error::{AppError, AppResult};
use crate::handlers::track::{find_track, store_version, UploadedFile};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/tracks/{track_id}/versions
///
/// List a track's versions newest-number first, with uploader usernames.
pub async fn list_by_track(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(track_id): Path<DbId>,
) -> AppResult<Json<Vec<TrackVersionWithUploader>>> {
    let track = find_track(&state, track_id).await?;
    access::require_member(&state.pool, track.project_id, auth_user.user_id).await?;

    let versions = TrackVersionRepo::list_by_track_with_uploader(&state.pool, track_id).await?;
    Ok(Json(versions))
}

/// POST /api/v1/tracks/{track_id}/versions
///
/// Multipart form: `file` (required), `notes` (optional). The new version
/// gets the next version number and becomes current in one transaction.
pub async fn add_version(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(track_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<TrackVersion>)> {
    let track = find_track(&state, track_id).await?;
    access::require_member(&state.pool, track.project_id, auth_user.user_id).await?;

    let mut file: Option<UploadedFile> = None;
    let mut notes: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file = Some(UploadedFile {
                    filename,
                    data: data.to_vec(),
                });
            }
            "notes" => {
                notes = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            _ => {} // ignore unknown fields
        }
    }

    let file = file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    let ext = audio::validate_extension(&file.filename).map_err(AppError::Core)?;
    audio::validate_size(file.data.len() as u64).map_err(AppError::Core)?;

    let version = store_version(&state, track_id, auth_user.user_id, file, &ext, notes).await?;
    Ok((StatusCode::CREATED, Json(version)))
}

/// PUT /api/v1/tracks/{track_id}/versions/{id}/set-current
///
/// Mark this version as the track's current one, un-marking any sibling
/// in the same transaction. Idempotent.
pub async fn set_current(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((track_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<TrackVersion>> {
    let track = find_track(&state, track_id).await?;
    access::require_member(&state.pool, track.project_id, auth_user.user_id).await?;

    let version = TrackVersionRepo::set_current(&state.pool, track_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TrackVersion",
            id,
        }))?;
    Ok(Json(version))
}

/// DELETE /api/v1/tracks/{track_id}/versions/{id}
///
/// Refuses to delete a track's only version. If the deleted version was
/// current, the highest-numbered remaining version is promoted in the
/// same transaction. The blob delete is best-effort.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((track_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let track = find_track(&state, track_id).await?;
    access::require_member(&state.pool, track.project_id, auth_user.user_id).await?;

    let count = TrackVersionRepo::count_for_track(&state.pool, track_id).await?;
    if count <= 1 {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot delete the only version of a track. Delete the track instead.".into(),
        )));
    }

    let deleted = TrackVersionRepo::delete_and_promote(&state.pool, track_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TrackVersion",
            id,
        }))?;

    state.storage.delete(&deleted.file_path).await;
    Ok(StatusCode::NO_CONTENT)
}
