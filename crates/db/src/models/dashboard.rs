//! Dashboard snapshot DTOs.
//!
//! The dashboard is a read-only composite assembled from independent
//! sub-queries; these are the shapes of its sections.

use chrono::NaiveDate;
use gtd_core::classify::{ItemStatus, ItemType};
use gtd_core::progress::progress_percentage;
use gtd_core::review::ReviewStatus;
use gtd_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::item::{ContextRef, ProjectRef};

/// Per-view item counts plus project counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ViewCounts {
    pub inbox: i64,
    pub next_actions: i64,
    pub waiting_for: i64,
    pub someday_maybe: i64,
    pub reference: i64,
    pub active_projects: i64,
    pub completed_projects: i64,
}

/// Raw row for due/overdue listings.
#[derive(Debug, Clone, FromRow)]
pub struct DueItemRow {
    pub id: DbId,
    pub title: String,
    pub due_date: Option<Timestamp>,
    pub project_id: Option<DbId>,
    pub context_id: Option<DbId>,
    pub project_title: Option<String>,
    pub context_name: Option<String>,
    pub context_color: Option<String>,
}

/// A due or overdue item with display references attached.
#[derive(Debug, Clone, Serialize)]
pub struct DueItem {
    pub id: DbId,
    pub title: String,
    pub due_date: Option<Timestamp>,
    pub project: Option<ProjectRef>,
    pub context: Option<ContextRef>,
}

impl From<DueItemRow> for DueItem {
    fn from(row: DueItemRow) -> Self {
        let project = match (row.project_id, row.project_title) {
            (Some(id), Some(title)) => Some(ProjectRef { id, title }),
            _ => None,
        };
        let context = match (row.context_id, row.context_name, row.context_color) {
            (Some(id), Some(name), Some(color)) => Some(ContextRef { id, name, color }),
            _ => None,
        };
        Self {
            id: row.id,
            title: row.title,
            due_date: row.due_date,
            project,
            context,
        }
    }
}

/// Recently modified item, any type or status.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecentItem {
    pub id: DbId,
    pub title: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub status: ItemStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A context with its active-item count. Contexts with zero active items
/// are excluded from the breakdown.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContextBreakdown {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub active_items_count: i64,
}

/// Raw row for the active-projects section.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectProgressRow {
    pub id: DbId,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub items_count: i64,
    pub active_items_count: i64,
    pub next_actions_count: i64,
    pub completed_items_count: i64,
}

/// An active project with counts and derived progress.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectProgress {
    pub id: DbId,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub items_count: i64,
    pub active_items_count: i64,
    pub next_actions_count: i64,
    pub progress_percentage: i32,
}

impl From<ProjectProgressRow> for ProjectProgress {
    fn from(row: ProjectProgressRow) -> Self {
        let progress = progress_percentage(row.completed_items_count, row.items_count);
        Self {
            id: row.id,
            title: row.title,
            due_date: row.due_date,
            items_count: row.items_count,
            active_items_count: row.active_items_count,
            next_actions_count: row.next_actions_count,
            progress_percentage: progress,
        }
    }
}

/// Completion counts for the current week/month windows.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductivityStats {
    pub completed_this_week: i64,
    pub completed_this_month: i64,
    pub projects_completed_this_month: i64,
}

/// Next-action counts per energy bucket. Always reports all three buckets,
/// zero when a bucket is empty.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EnergyBuckets {
    pub low: i64,
    pub medium: i64,
    pub high: i64,
}

/// A waiting-for item that has gone a week or more without movement.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WaitingFollowUp {
    pub id: DbId,
    pub title: String,
    pub waiting_for_person: Option<String>,
    pub waiting_since: Option<NaiveDate>,
}

/// The full dashboard snapshot.
#[derive(Debug, Serialize)]
pub struct DashboardSnapshot {
    pub counts: ViewCounts,
    pub overdue_items: Vec<DueItem>,
    pub due_today_items: Vec<DueItem>,
    pub due_this_week_items: Vec<DueItem>,
    pub recent_activity: Vec<RecentItem>,
    pub context_breakdown: Vec<ContextBreakdown>,
    pub active_projects: Vec<ProjectProgress>,
    pub weekly_review_status: ReviewStatus,
    pub productivity_stats: ProductivityStats,
    pub next_actions_by_energy: EnergyBuckets,
    pub waiting_for_follow_up: Vec<WaitingFollowUp>,
    pub generated_at: Timestamp,
}
