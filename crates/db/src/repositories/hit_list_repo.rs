//! Repository for the `hit_list_items` and `hit_list_comments` tables.

use sqlx::PgPool;

use donut_core::types::DbId;

use crate::models::hit_list::{
    CreateHitListItem, HitListComment, HitListCommentWithUser, HitListItem, UpdateHitListItem,
};

/// Column list shared across item queries to avoid repetition.
const ITEM_COLUMNS: &str = "id, project_id, track_id, title, description, priority, status, \
    category, sort_order, created_by, created_at, updated_at";

const COMMENT_COLUMNS: &str = "id, item_id, user_id, body, created_at";

/// Provides CRUD operations for hit-list items and their comments.
pub struct HitListRepo;

impl HitListRepo {
    /// Insert a new hit-list item for a project.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        created_by: DbId,
        input: &CreateHitListItem,
    ) -> Result<HitListItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO hit_list_items
                (project_id, track_id, title, description, priority, category, sort_order, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, HitListItem>(&query)
            .bind(project_id)
            .bind(input.track_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.priority)
            .bind(&input.category)
            .bind(input.sort_order)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a hit-list item by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<HitListItem>, sqlx::Error> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM hit_list_items WHERE id = $1");
        sqlx::query_as::<_, HitListItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's hit-list items, optionally narrowed to one track,
    /// in sort order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        track_id: Option<DbId>,
    ) -> Result<Vec<HitListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM hit_list_items
             WHERE project_id = $1 AND ($2::BIGINT IS NULL OR track_id = $2)
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, HitListItem>(&query)
            .bind(project_id)
            .bind(track_id)
            .fetch_all(pool)
            .await
    }

    /// Update a hit-list item. Only non-`None` fields in `input` are
    /// applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateHitListItem,
    ) -> Result<Option<HitListItem>, sqlx::Error> {
        let query = format!(
            "UPDATE hit_list_items SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                priority = COALESCE($4, priority),
                status = COALESCE($5, status),
                category = COALESCE($6, category),
                sort_order = COALESCE($7, sort_order),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, HitListItem>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.priority)
            .bind(input.status)
            .bind(&input.category)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a hit-list item (comments cascade). Returns `true` if a
    /// row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM hit_list_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── Comments ─────────────────────────────────────────────────────

    /// Add a comment to an item.
    pub async fn add_comment(
        pool: &PgPool,
        item_id: DbId,
        user_id: DbId,
        body: &str,
    ) -> Result<HitListComment, sqlx::Error> {
        let query = format!(
            "INSERT INTO hit_list_comments (item_id, user_id, body)
             VALUES ($1, $2, $3)
             RETURNING {COMMENT_COLUMNS}"
        );
        sqlx::query_as::<_, HitListComment>(&query)
            .bind(item_id)
            .bind(user_id)
            .bind(body)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by internal ID.
    pub async fn find_comment(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<HitListComment>, sqlx::Error> {
        let query = format!("SELECT {COMMENT_COLUMNS} FROM hit_list_comments WHERE id = $1");
        sqlx::query_as::<_, HitListComment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an item's comments with author usernames, oldest first.
    pub async fn list_comments(
        pool: &PgPool,
        item_id: DbId,
    ) -> Result<Vec<HitListCommentWithUser>, sqlx::Error> {
        sqlx::query_as::<_, HitListCommentWithUser>(
            "SELECT c.id, c.item_id, c.user_id, u.username, c.body, c.created_at
             FROM hit_list_comments c
             JOIN users u ON u.id = c.user_id
             WHERE c.item_id = $1
             ORDER BY c.created_at, c.id",
        )
        .bind(item_id)
        .fetch_all(pool)
        .await
    }

    /// Delete a comment. Returns `true` if a row was removed.
    pub async fn delete_comment(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM hit_list_comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
