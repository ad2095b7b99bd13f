//! Repository for the `projects` table.

use gtd_core::classify::ProjectStatus;
use gtd_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{
    CreateProject, Project, ProjectCountsRow, ProjectWithCounts, UpdateProject,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, status, due_date, user_id, created_at, updated_at";

/// Count columns for the annotated listing queries.
const COUNT_COLUMNS: &str = "COUNT(i.id) AS items_count,
    COUNT(i.id) FILTER (WHERE i.status = 'active') AS active_items_count,
    COUNT(i.id) FILTER (WHERE i.type = 'next_action' AND i.status = 'active') AS next_actions_count,
    COUNT(i.id) FILTER (WHERE i.status = 'completed') AS completed_items_count";

/// Provides CRUD operations for projects, always scoped to one owner.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project. Status defaults to `active` if omitted.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, description, status, due_date, user_id)
             VALUES ($1, $2, COALESCE($3, 'active'), $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.due_date)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether the owner has a project with this id.
    pub async fn exists(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let found: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM projects WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(pool)
                .await?;
        Ok(found.is_some())
    }

    /// List the owner's projects with item counts and derived progress,
    /// optionally filtered by status, newest first.
    pub async fn list_with_counts(
        pool: &PgPool,
        user_id: DbId,
        status: Option<ProjectStatus>,
    ) -> Result<Vec<ProjectWithCounts>, sqlx::Error> {
        let query = format!(
            "SELECT p.id, p.title, p.description, p.status, p.due_date,
                    p.created_at, p.updated_at, {COUNT_COLUMNS}
             FROM projects p
             LEFT JOIN items i ON i.project_id = p.id
             WHERE p.user_id = $1
               AND ($2::project_status IS NULL OR p.status = $2)
             GROUP BY p.id
             ORDER BY p.created_at DESC"
        );
        let rows = sqlx::query_as::<_, ProjectCountsRow>(&query)
            .bind(user_id)
            .bind(status)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(ProjectWithCounts::from).collect())
    }

    /// Load a single project with counts and derived progress.
    pub async fn find_with_counts(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<ProjectWithCounts>, sqlx::Error> {
        let query = format!(
            "SELECT p.id, p.title, p.description, p.status, p.due_date,
                    p.created_at, p.updated_at, {COUNT_COLUMNS}
             FROM projects p
             LEFT JOIN items i ON i.project_id = p.id
             WHERE p.id = $1 AND p.user_id = $2
             GROUP BY p.id"
        );
        let row = sqlx::query_as::<_, ProjectCountsRow>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(ProjectWithCounts::from))
    }

    /// Update a project. Omitted fields keep their value; an explicit null
    /// clears `description` or `due_date`.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($3, title),
                status = COALESCE($4, status),
                description = CASE WHEN $5 THEN $6 ELSE description END,
                due_date = CASE WHEN $7 THEN $8 ELSE due_date END
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(input.status)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|v| v.as_deref()))
            .bind(input.due_date.is_some())
            .bind(input.due_date.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Delete a project, cascading to its items. Returns `true` if a row
    /// was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
