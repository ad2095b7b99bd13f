//! Repository for the `items` table.
//!
//! View queries are driven by [`GtdView`] and [`ItemFilter`] from
//! `gtd-core`: the view picks the type/status predicate and default
//! ordering, the filter contributes NULL-tolerant conjunctions bound as
//! optional parameters, so each view+filter combination is a single
//! prepared statement.

use gtd_core::classify::{GtdView, ItemFilter, ItemStatus, ItemType};
use gtd_core::types::DbId;
use sqlx::PgPool;

use crate::models::item::{
    ClarifyItem, CreateItem, Item, ItemRefsRow, ItemWithRefs, UpdateItem,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, type, status, due_date, reminder_date, \
    energy_level, time_estimate, notes, user_id, project_id, context_id, \
    waiting_for_person, waiting_since, created_at, updated_at";

/// Column list for queries joining project/context display data.
const REF_COLUMNS: &str = "i.id, i.title, i.description, i.type, i.status, i.due_date, \
    i.reminder_date, i.energy_level, i.time_estimate, i.notes, i.project_id, i.context_id, \
    i.waiting_for_person, i.waiting_since, i.created_at, i.updated_at, \
    p.title AS project_title, c.name AS context_name, c.color AS context_color";

/// Joins matching [`REF_COLUMNS`].
const REF_JOINS: &str = "LEFT JOIN projects p ON p.id = i.project_id \
    LEFT JOIN contexts c ON c.id = i.context_id";

/// Default list ordering: soonest due first (no due date last), then high
/// energy first as tie-break.
const DEFAULT_ORDER: &str = "i.due_date ASC NULLS LAST, i.energy_level DESC";

/// Provides CRUD, workflow, and view queries for items, always scoped to
/// one owner.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item. Type defaults to `inbox`, energy level to 2;
    /// status always starts `active`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateItem,
    ) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO items (title, description, type, due_date, reminder_date,
                                energy_level, time_estimate, notes, user_id,
                                project_id, context_id, waiting_for_person, waiting_since)
             VALUES ($1, $2, COALESCE($3, 'inbox'), $4, $5, COALESCE($6, 2), $7, $8, $9,
                     $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.item_type)
            .bind(input.due_date)
            .bind(input.reminder_date)
            .bind(input.energy_level)
            .bind(input.time_estimate)
            .bind(&input.notes)
            .bind(user_id)
            .bind(input.project_id)
            .bind(input.context_id)
            .bind(&input.waiting_for_person)
            .bind(input.waiting_since)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Load one item with project/context display data attached.
    pub async fn find_with_refs(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<ItemWithRefs>, sqlx::Error> {
        let query = format!(
            "SELECT {REF_COLUMNS} FROM items i {REF_JOINS}
             WHERE i.id = $1 AND i.user_id = $2"
        );
        let row = sqlx::query_as::<_, ItemRefsRow>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(ItemWithRefs::from))
    }

    /// Generic item listing: one status, optionally narrowed by type and
    /// context, in the default ordering.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        item_type: Option<ItemType>,
        status: ItemStatus,
        context_id: Option<DbId>,
    ) -> Result<Vec<ItemWithRefs>, sqlx::Error> {
        let query = format!(
            "SELECT {REF_COLUMNS} FROM items i {REF_JOINS}
             WHERE i.user_id = $1
               AND i.status = $2
               AND ($3::item_type IS NULL OR i.type = $3)
               AND ($4::BIGINT IS NULL OR i.context_id = $4)
             ORDER BY {DEFAULT_ORDER}"
        );
        let rows = sqlx::query_as::<_, ItemRefsRow>(&query)
            .bind(user_id)
            .bind(status)
            .bind(item_type)
            .bind(context_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(ItemWithRefs::from).collect())
    }

    /// List the items belonging to a GTD view, further narrowed by a
    /// secondary filter.
    pub async fn list_view(
        pool: &PgPool,
        user_id: DbId,
        view: GtdView,
        filter: &ItemFilter,
    ) -> Result<Vec<ItemWithRefs>, sqlx::Error> {
        // Reference material stays listed regardless of status.
        let active_clause = if view.requires_active() {
            "AND i.status = 'active'"
        } else {
            ""
        };
        let order = match view {
            GtdView::NextActions => DEFAULT_ORDER,
            GtdView::WaitingFor => "i.waiting_since ASC NULLS LAST",
            GtdView::Inbox | GtdView::SomedayMaybe | GtdView::Reference => "i.created_at DESC",
        };
        let query = format!(
            "SELECT {REF_COLUMNS} FROM items i {REF_JOINS}
             WHERE i.user_id = $1
               AND i.type = $2
               {active_clause}
               AND ($3::BIGINT IS NULL OR i.context_id = $3)
               AND ($4::INT IS NULL OR i.energy_level = $4)
               AND ($5::INT IS NULL OR (i.time_estimate IS NOT NULL AND i.time_estimate <= $5))
             ORDER BY {order}"
        );
        let rows = sqlx::query_as::<_, ItemRefsRow>(&query)
            .bind(user_id)
            .bind(view.item_type())
            .bind(filter.context_id)
            .bind(filter.energy_level)
            .bind(filter.max_minutes)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(ItemWithRefs::from).collect())
    }

    /// Active items tagged with a context, in the default ordering.
    pub async fn list_by_context(
        pool: &PgPool,
        user_id: DbId,
        context_id: DbId,
    ) -> Result<Vec<ItemWithRefs>, sqlx::Error> {
        let query = format!(
            "SELECT {REF_COLUMNS} FROM items i {REF_JOINS}
             WHERE i.user_id = $1 AND i.context_id = $2 AND i.status = 'active'
             ORDER BY {DEFAULT_ORDER}"
        );
        let rows = sqlx::query_as::<_, ItemRefsRow>(&query)
            .bind(user_id)
            .bind(context_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(ItemWithRefs::from).collect())
    }

    /// A project's active next actions, in the default ordering.
    pub async fn next_actions_for_project(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
    ) -> Result<Vec<ItemWithRefs>, sqlx::Error> {
        let query = format!(
            "SELECT {REF_COLUMNS} FROM items i {REF_JOINS}
             WHERE i.user_id = $1 AND i.project_id = $2
               AND i.type = 'next_action' AND i.status = 'active'
             ORDER BY {DEFAULT_ORDER}"
        );
        let rows = sqlx::query_as::<_, ItemRefsRow>(&query)
            .bind(user_id)
            .bind(project_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(ItemWithRefs::from).collect())
    }

    /// Update an item. Omitted fields keep their value; nullable fields
    /// bind a presence flag alongside the value so an explicit null clears
    /// the column instead of being swallowed by COALESCE.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateItem,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "UPDATE items SET
                title = COALESCE($3, title),
                type = COALESCE($4, type),
                status = COALESCE($5, status),
                energy_level = COALESCE($6, energy_level),
                description = CASE WHEN $7 THEN $8 ELSE description END,
                due_date = CASE WHEN $9 THEN $10 ELSE due_date END,
                reminder_date = CASE WHEN $11 THEN $12 ELSE reminder_date END,
                time_estimate = CASE WHEN $13 THEN $14 ELSE time_estimate END,
                notes = CASE WHEN $15 THEN $16 ELSE notes END,
                project_id = CASE WHEN $17 THEN $18 ELSE project_id END,
                context_id = CASE WHEN $19 THEN $20 ELSE context_id END,
                waiting_for_person = CASE WHEN $21 THEN $22 ELSE waiting_for_person END,
                waiting_since = CASE WHEN $23 THEN $24 ELSE waiting_since END
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(input.item_type)
            .bind(input.status)
            .bind(input.energy_level)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|v| v.as_deref()))
            .bind(input.due_date.is_some())
            .bind(input.due_date.flatten())
            .bind(input.reminder_date.is_some())
            .bind(input.reminder_date.flatten())
            .bind(input.time_estimate.is_some())
            .bind(input.time_estimate.flatten())
            .bind(input.notes.is_some())
            .bind(input.notes.as_ref().and_then(|v| v.as_deref()))
            .bind(input.project_id.is_some())
            .bind(input.project_id.flatten())
            .bind(input.context_id.is_some())
            .bind(input.context_id.flatten())
            .bind(input.waiting_for_person.is_some())
            .bind(input.waiting_for_person.as_ref().and_then(|v| v.as_deref()))
            .bind(input.waiting_since.is_some())
            .bind(input.waiting_since.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Mark an item completed. Type is untouched: completing reference
    /// material is allowed.
    pub async fn complete(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "UPDATE items SET status = 'completed'
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Clarify an item: set its type and optionally organize it under a
    /// project/context or record who it is waiting on.
    pub async fn clarify(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &ClarifyItem,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "UPDATE items SET
                type = $3,
                project_id = COALESCE($4, project_id),
                context_id = COALESCE($5, context_id),
                waiting_for_person = COALESCE($6, waiting_for_person),
                waiting_since = COALESCE($7, waiting_since)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(user_id)
            .bind(input.item_type)
            .bind(input.project_id)
            .bind(input.context_id)
            .bind(&input.waiting_for_person)
            .bind(input.waiting_since)
            .fetch_optional(pool)
            .await
    }

    /// Delete an item permanently. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
