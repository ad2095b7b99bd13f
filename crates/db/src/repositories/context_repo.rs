//! Repository for the `contexts` table.

use gtd_core::types::DbId;
use sqlx::PgPool;

use crate::models::context::{Context, ContextWithCount, CreateContext, UpdateContext, DEFAULT_COLOR};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, icon, color, user_id, created_at, updated_at";

/// Provides CRUD operations for contexts, always scoped to one owner.
pub struct ContextRepo;

impl ContextRepo {
    /// Insert a new context, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateContext,
    ) -> Result<Context, sqlx::Error> {
        let query = format!(
            "INSERT INTO contexts (name, icon, color, user_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Context>(&query)
            .bind(&input.name)
            .bind(&input.icon)
            .bind(input.color.as_deref().unwrap_or(DEFAULT_COLOR))
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Context>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contexts WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Context>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether the owner has a context with this id. Used to validate
    /// context references on item bodies without loading the row.
    pub async fn exists(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let found: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM contexts WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(pool)
                .await?;
        Ok(found.is_some())
    }

    /// List the owner's contexts with active-item counts, ordered by name.
    pub async fn list_with_counts(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ContextWithCount>, sqlx::Error> {
        sqlx::query_as::<_, ContextWithCount>(
            "SELECT c.id, c.name, c.icon, c.color,
                    COUNT(i.id) FILTER (WHERE i.status = 'active') AS active_items_count,
                    c.created_at, c.updated_at
             FROM contexts c
             LEFT JOIN items i ON i.context_id = c.id
             WHERE c.user_id = $1
             GROUP BY c.id
             ORDER BY c.name",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Load a single context with its active-item count.
    pub async fn find_with_count(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<ContextWithCount>, sqlx::Error> {
        sqlx::query_as::<_, ContextWithCount>(
            "SELECT c.id, c.name, c.icon, c.color,
                    COUNT(i.id) FILTER (WHERE i.status = 'active') AS active_items_count,
                    c.created_at, c.updated_at
             FROM contexts c
             LEFT JOIN items i ON i.context_id = c.id
             WHERE c.id = $1 AND c.user_id = $2
             GROUP BY c.id",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Update a context. Omitted fields keep their value; an explicit null
    /// clears `icon`.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateContext,
    ) -> Result<Option<Context>, sqlx::Error> {
        let query = format!(
            "UPDATE contexts SET
                name = COALESCE($3, name),
                color = COALESCE($4, color),
                icon = CASE WHEN $5 THEN $6 ELSE icon END
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Context>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.color)
            .bind(input.icon.is_some())
            .bind(input.icon.as_ref().and_then(|v| v.as_deref()))
            .fetch_optional(pool)
            .await
    }

    /// Count the items (any status) still referencing this context.
    ///
    /// The API refuses to delete a context while this is non-zero; the
    /// schema's ON DELETE SET NULL only applies if the block is bypassed
    /// by direct store access.
    pub async fn item_count(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM items WHERE context_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Delete a context. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contexts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
