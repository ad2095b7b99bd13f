//! Project entity model and DTOs.

use chrono::NaiveDate;
use gtd_core::classify::ProjectStatus;
use gtd_core::progress::progress_percentage;
use gtd_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub due_date: Option<NaiveDate>,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Raw per-project item counts as they come back from the join query.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectCountsRow {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub due_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub items_count: i64,
    pub active_items_count: i64,
    pub next_actions_count: i64,
    pub completed_items_count: i64,
}

/// A project annotated with item counts and its derived progress.
///
/// `progress_percentage` is computed from the counts at read time; it is
/// never stored.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithCounts {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub due_date: Option<NaiveDate>,
    pub items_count: i64,
    pub active_items_count: i64,
    pub next_actions_count: i64,
    pub progress_percentage: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ProjectCountsRow> for ProjectWithCounts {
    fn from(row: ProjectCountsRow) -> Self {
        let progress = progress_percentage(row.completed_items_count, row.items_count);
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            status: row.status,
            due_date: row.due_date,
            items_count: row.items_count,
            active_items_count: row.active_items_count,
            next_actions_count: row.next_actions_count,
            progress_percentage: progress,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `active` if omitted.
    pub status: Option<ProjectStatus>,
    pub due_date: Option<NaiveDate>,
}

/// DTO for updating a project. Omitted fields are left untouched.
///
/// `description` and `due_date` are double-`Option`: `Some(None)` is an
/// explicit JSON `null` and clears the column.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub description: Option<Option<String>>,
    pub status: Option<ProjectStatus>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub due_date: Option<Option<NaiveDate>>,
}
