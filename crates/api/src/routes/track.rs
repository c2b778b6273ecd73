//! Route definitions for the `/tracks` resource and nested versions.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use donut_core::audio::MAX_UPLOAD_BYTES;

use crate::handlers::{track, track_version};
use crate::state::AppState;

/// Body limit for multipart upload routes: the audio cap plus headroom
/// for the other form fields. The handler enforces the exact cap.
const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES as usize + 1024 * 1024;

/// Routes mounted at `/tracks`.
///
/// ```text
/// POST   /upload                                  -> create track + version 1 (multipart)
/// PUT    /{track_id}                              -> update title/status
/// DELETE /{track_id}                              -> delete track
/// GET    /{track_id}/versions                     -> list versions
/// POST   /{track_id}/versions                     -> add version (multipart)
/// PUT    /{track_id}/versions/{id}/set-current    -> switch current version
/// DELETE /{track_id}/versions/{id}                -> delete version
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(track::upload))
        .route("/{track_id}", put(track::update).delete(track::delete))
        .route(
            "/{track_id}/versions",
            get(track_version::list_by_track).post(track_version::add_version),
        )
        .route(
            "/{track_id}/versions/{id}/set-current",
            put(track_version::set_current),
        )
        .route(
            "/{track_id}/versions/{id}",
            axum::routing::delete(track_version::delete),
        )
        // Uploads exceed axum's 2 MiB default body cap.
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}
