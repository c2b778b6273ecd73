//! Hit-list item and comment models and DTOs.

use donut_core::roles::{HitListPriority, HitListStatus};
use donut_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A task entry scoped to a project or, optionally, one of its tracks.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HitListItem {
    pub id: DbId,
    pub project_id: DbId,
    pub track_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub priority: HitListPriority,
    pub status: HitListStatus,
    pub category: Option<String>,
    pub sort_order: i32,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating a hit-list item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateHitListItem {
    pub track_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub priority: HitListPriority,
    pub category: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

/// DTO for updating a hit-list item. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateHitListItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<HitListPriority>,
    pub status: Option<HitListStatus>,
    pub category: Option<String>,
    pub sort_order: Option<i32>,
}

/// A comment on a hit-list item.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HitListComment {
    pub id: DbId,
    pub item_id: DbId,
    pub user_id: DbId,
    pub body: String,
    pub created_at: Timestamp,
}

/// Read model for comment listings: comment plus author username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HitListCommentWithUser {
    pub id: DbId,
    pub item_id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub body: String,
    pub created_at: Timestamp,
}
