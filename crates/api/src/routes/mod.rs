pub mod auth;
pub mod health;
pub mod hit_list;
pub mod invitation;
pub mod project;
pub mod track;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         profile (requires auth)
///
/// /projects                                        list, create
/// /projects/{id}                                   get, update, delete
/// /projects/{id}/tracks                            tracks + current versions
/// /projects/{id}/tracks/reorder                    reorder (PUT)
/// /projects/{id}/collaborators                     list, add-by-email
/// /projects/{id}/collaborators/{cid}               soft-remove (DELETE)
/// /projects/{id}/invitations                       pending invitations
/// /projects/{id}/hit-list                          list, create items
///
/// /tracks/upload                                   create track + version 1
/// /tracks/{track_id}                               update, delete
/// /tracks/{track_id}/versions                      list, add version
/// /tracks/{track_id}/versions/{id}/set-current     switch current (PUT)
/// /tracks/{track_id}/versions/{id}                 delete version
///
/// /invitations                                     caller's pending inbox
/// /invitations/send                                send (POST)
/// /invitations/{id}/respond                        accept/decline (POST)
/// /invitations/{id}/cancel                         withdraw (DELETE)
///
/// /hit-list/{item_id}                              update, delete item
/// /hit-list/{item_id}/comments                     list, add comments
/// /hit-list/{item_id}/comments/{id}                delete comment
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", project::router())
        .nest("/tracks", track::router())
        .nest("/invitations", invitation::router())
        .nest("/hit-list", hit_list::router())
}
