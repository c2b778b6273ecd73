//! Route definitions for the `/hit-list` resource.
//!
//! Item creation and listing live under `/projects/{id}/hit-list`; this
//! router covers item-scoped operations.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::hit_list;
use crate::state::AppState;

/// Routes mounted at `/hit-list`.
///
/// ```text
/// PUT    /{item_id}                 -> update item (creator only)
/// DELETE /{item_id}                 -> delete item (creator only)
/// GET    /{item_id}/comments        -> list comments
/// POST   /{item_id}/comments        -> add comment
/// DELETE /{item_id}/comments/{id}   -> delete comment (author only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{item_id}",
            put(hit_list::update).delete(hit_list::delete),
        )
        .route(
            "/{item_id}/comments",
            get(hit_list::list_comments).post(hit_list::add_comment),
        )
        .route("/{item_id}/comments/{id}", delete(hit_list::delete_comment))
}
