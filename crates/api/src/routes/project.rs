//! Route definitions for the `/projects` resource and its nested
//! collections (tracks listing/reorder, collaborators, invitations,
//! hit list).

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::{collaborator, hit_list, invitation, project, track};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                              -> list (mine)
/// POST   /                              -> create
/// GET    /{id}                          -> get
/// PUT    /{id}                          -> update
/// DELETE /{id}                          -> delete (creator only)
/// GET    /{id}/tracks                   -> tracks with current versions
/// PUT    /{id}/tracks/reorder           -> reorder tracks
/// GET    /{id}/collaborators            -> list active collaborators
/// POST   /{id}/collaborators            -> add by email
/// DELETE /{id}/collaborators/{cid}      -> soft-remove
/// GET    /{id}/invitations              -> pending invitations
/// GET    /{id}/hit-list                 -> list items (?track_id=)
/// POST   /{id}/hit-list                 -> create item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/tracks", get(track::list_by_project))
        .route("/{id}/tracks/reorder", put(track::reorder))
        .route(
            "/{id}/collaborators",
            get(collaborator::list).post(collaborator::add),
        )
        .route("/{id}/collaborators/{cid}", delete(collaborator::remove))
        .route("/{id}/invitations", get(invitation::list_for_project))
        .route("/{id}/hit-list", get(hit_list::list).post(hit_list::create))
}
