//! Route definitions for the `/invitations` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::invitation;
use crate::state::AppState;

/// Routes mounted at `/invitations`.
///
/// ```text
/// GET    /               -> caller's pending invitations
/// POST   /send           -> send invitation
/// POST   /{id}/respond   -> accept or decline
/// DELETE /{id}/cancel    -> withdraw
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(invitation::list_mine))
        .route("/send", post(invitation::send))
        .route("/{id}/respond", post(invitation::respond))
        .route("/{id}/cancel", delete(invitation::cancel))
}
