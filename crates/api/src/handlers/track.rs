//! Handlers for the `/tracks` resource (track CRUD and reordering).

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use donut_core::audio;
use donut_core::error::CoreError;
use donut_core::types::DbId;
use donut_db::models::track::{CreateTrack, ReorderEntry, Track, TrackWithCurrentVersion, UpdateTrack};
use donut_db::models::track_version::{CreateTrackVersion, TrackVersion};
use donut_db::repositories::{TrackRepo, TrackVersionRepo};
use serde::{Deserialize, Serialize};

use crate::access;
use crate::error::{AppError, AppResult};
use crate::metadata;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// One parsed `file` field from a multipart upload.
pub(crate) struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Fields collected from the track upload form.
#[derive(Default)]
struct UploadForm {
    project_id: Option<DbId>,
    title: Option<String>,
    order_index: Option<i32>,
    notes: Option<String>,
    file: Option<UploadedFile>,
}

/// Response body for `POST /tracks/upload`.
#[derive(Debug, Serialize)]
pub struct TrackUploadResponse {
    pub track: Track,
    pub version: TrackVersion,
}

/// Request body for `PUT /projects/{id}/tracks/reorder`.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub tracks: Vec<ReorderEntry>,
}

/// POST /api/v1/tracks/upload
///
/// Multipart form: `project_id`, `title`, `file` (required); `order_index`,
/// `notes` (optional). Creates the track together with version 1 so a
/// track never exists without a current version. If writing the version
/// fails after the track row was inserted, the track row is deleted again
/// before the error is surfaced.
pub async fn upload(
    State(state): State<AppState>,
    auth_user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<TrackUploadResponse>)> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "project_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let id = text
                    .parse()
                    .map_err(|_| AppError::BadRequest("project_id must be an integer".into()))?;
                form.project_id = Some(id);
            }
            "title" => {
                form.title = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            "order_index" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let index = text
                    .parse()
                    .map_err(|_| AppError::BadRequest("order_index must be an integer".into()))?;
                form.order_index = Some(index);
            }
            "notes" => {
                form.notes = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.file = Some(UploadedFile {
                    filename,
                    data: data.to_vec(),
                });
            }
            _ => {} // ignore unknown fields
        }
    }

    let project_id = form
        .project_id
        .ok_or_else(|| AppError::BadRequest("Missing required 'project_id' field".into()))?;
    let title = form
        .title
        .ok_or_else(|| AppError::BadRequest("Missing required 'title' field".into()))?;
    let file = form
        .file
        .ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    access::require_member(&state.pool, project_id, auth_user.user_id).await?;

    if title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Track title must not be empty".into(),
        )));
    }
    let ext = audio::validate_extension(&file.filename).map_err(AppError::Core)?;
    audio::validate_size(file.data.len() as u64).map_err(AppError::Core)?;

    // Absent order index means append to the end of the project.
    let order_index = match form.order_index {
        Some(index) => index,
        None => TrackRepo::next_order_index(&state.pool, project_id).await?,
    };

    let track = TrackRepo::create(
        &state.pool,
        &CreateTrack {
            project_id,
            title: title.trim().to_string(),
            order_index,
            created_by: auth_user.user_id,
        },
    )
    .await?;

    // The track row exists but has no version yet; any failure from here
    // until the version insert commits must take the track row with it.
    match store_version(&state, track.id, auth_user.user_id, file, &ext, form.notes).await {
        Ok(version) => Ok((
            StatusCode::CREATED,
            Json(TrackUploadResponse { track, version }),
        )),
        Err(err) => {
            if let Err(cleanup) = TrackRepo::delete(&state.pool, track.id).await {
                tracing::error!(
                    track_id = track.id,
                    error = %cleanup,
                    "Failed to roll back track after version insert failure"
                );
            }
            Err(err)
        }
    }
}

/// Write the blob, probe its duration, and insert the version row as
/// current. On insert failure the blob is removed again best-effort.
pub(crate) async fn store_version(
    state: &AppState,
    track_id: DbId,
    uploaded_by: DbId,
    file: UploadedFile,
    ext: &str,
    notes: Option<String>,
) -> Result<TrackVersion, AppError> {
    let next_number = TrackVersionRepo::count_for_track(&state.pool, track_id).await? as i32 + 1;
    let filename = audio::storage_filename(track_id, next_number, ext);
    let stored_path = state.storage.save(&filename, &file.data).await?;

    let duration_secs = metadata::probe_duration_secs(file.data, ext).await;

    let input = CreateTrackVersion {
        track_id,
        file_path: stored_path.clone(),
        file_type: ext.to_string(),
        duration_secs,
        uploaded_by,
        notes,
    };

    match TrackVersionRepo::create_as_current(&state.pool, &input).await {
        Ok(version) => Ok(version),
        Err(err) => {
            state.storage.delete(&stored_path).await;
            Err(err.into())
        }
    }
}

/// GET /api/v1/projects/{id}/tracks
///
/// List a project's tracks in play order with each track's current
/// version and its uploader.
pub async fn list_by_project(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<TrackWithCurrentVersion>>> {
    access::require_member(&state.pool, project_id, auth_user.user_id).await?;
    let tracks = TrackRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(tracks))
}

/// PUT /api/v1/tracks/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTrack>,
) -> AppResult<Json<Track>> {
    let track = find_track(&state, id).await?;
    access::require_member(&state.pool, track.project_id, auth_user.user_id).await?;

    if let Some(title) = &input.title {
        if title.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Track title must not be empty".into(),
            )));
        }
    }

    let track = TrackRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id,
        }))?;
    Ok(Json(track))
}

/// DELETE /api/v1/tracks/{id}
///
/// Deletes the track row (versions and track-scoped hit-list items
/// cascade) after removing each version's blob best-effort.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let track = find_track(&state, id).await?;
    access::require_member(&state.pool, track.project_id, auth_user.user_id).await?;

    let versions = TrackVersionRepo::list_by_track(&state.pool, id).await?;
    for version in &versions {
        state.storage.delete(&version.file_path).await;
    }

    TrackRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/projects/{id}/tracks/reorder
///
/// Assign explicit order indices to the project's tracks. Entries for
/// unknown tracks are skipped; gaps and duplicates are allowed and the
/// listing order stays stable via the (order_index, id) sort.
pub async fn reorder(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<StatusCode> {
    access::require_member(&state.pool, project_id, auth_user.user_id).await?;
    TrackRepo::reorder(&state.pool, project_id, &input.tracks).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Look up a track or produce a 404.
pub(crate) async fn find_track(state: &AppState, id: DbId) -> Result<Track, AppError> {
    TrackRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id,
        }))
}
