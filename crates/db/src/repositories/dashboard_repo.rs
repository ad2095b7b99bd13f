//! Read-only sub-queries composed into the dashboard snapshot.
//!
//! Each method is an independent read; the aggregating handler runs them
//! in sequence and fails the whole snapshot on the first error, so a
//! dashboard never renders with silently-missing sections. Callers derive
//! every window from a single "now" so all sections agree on the clock.

use chrono::NaiveDate;
use gtd_core::classify::EnergyBucket;
use gtd_core::time::TimeRange;
use gtd_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::dashboard::{
    ContextBreakdown, DueItem, DueItemRow, EnergyBuckets, ProductivityStats, ProjectProgress,
    ProjectProgressRow, RecentItem, ViewCounts, WaitingFollowUp,
};

/// Columns for due/overdue listings with display references.
const DUE_COLUMNS: &str = "i.id, i.title, i.due_date, i.project_id, i.context_id, \
    p.title AS project_title, c.name AS context_name, c.color AS context_color";

/// Joins matching [`DUE_COLUMNS`].
const DUE_JOINS: &str = "LEFT JOIN projects p ON p.id = i.project_id \
    LEFT JOIN contexts c ON c.id = i.context_id";

/// Provides the dashboard's read-only aggregation queries.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Item counts for all five views plus active/completed project counts.
    pub async fn view_counts(pool: &PgPool, user_id: DbId) -> Result<ViewCounts, sqlx::Error> {
        sqlx::query_as::<_, ViewCounts>(
            "SELECT
                COUNT(*) FILTER (WHERE type = 'inbox' AND status = 'active') AS inbox,
                COUNT(*) FILTER (WHERE type = 'next_action' AND status = 'active') AS next_actions,
                COUNT(*) FILTER (WHERE type = 'waiting_for' AND status = 'active') AS waiting_for,
                COUNT(*) FILTER (WHERE type = 'someday_maybe' AND status = 'active') AS someday_maybe,
                COUNT(*) FILTER (WHERE type = 'reference') AS reference,
                (SELECT COUNT(*) FROM projects WHERE user_id = $1 AND status = 'active')
                    AS active_projects,
                (SELECT COUNT(*) FROM projects WHERE user_id = $1 AND status = 'completed')
                    AS completed_projects
             FROM items WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Active items with a due date strictly before `now`, soonest first.
    pub async fn overdue_items(
        pool: &PgPool,
        user_id: DbId,
        now: Timestamp,
        limit: i64,
    ) -> Result<Vec<DueItem>, sqlx::Error> {
        let query = format!(
            "SELECT {DUE_COLUMNS} FROM items i {DUE_JOINS}
             WHERE i.user_id = $1 AND i.status = 'active'
               AND i.due_date IS NOT NULL AND i.due_date < $2
             ORDER BY i.due_date ASC
             LIMIT $3"
        );
        let rows = sqlx::query_as::<_, DueItemRow>(&query)
            .bind(user_id)
            .bind(now)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(DueItem::from).collect())
    }

    /// Count of overdue active items (for review templates).
    pub async fn overdue_count(
        pool: &PgPool,
        user_id: DbId,
        now: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM items
             WHERE user_id = $1 AND status = 'active'
               AND due_date IS NOT NULL AND due_date < $2",
        )
        .bind(user_id)
        .bind(now)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Active items due within a window, soonest first.
    pub async fn due_in_range(
        pool: &PgPool,
        user_id: DbId,
        range: TimeRange,
        limit: i64,
    ) -> Result<Vec<DueItem>, sqlx::Error> {
        let query = format!(
            "SELECT {DUE_COLUMNS} FROM items i {DUE_JOINS}
             WHERE i.user_id = $1 AND i.status = 'active'
               AND i.due_date >= $2 AND i.due_date < $3
             ORDER BY i.due_date ASC
             LIMIT $4"
        );
        let rows = sqlx::query_as::<_, DueItemRow>(&query)
            .bind(user_id)
            .bind(range.start)
            .bind(range.end)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(DueItem::from).collect())
    }

    /// Most recently modified items, any type or status.
    pub async fn recent_activity(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<RecentItem>, sqlx::Error> {
        sqlx::query_as::<_, RecentItem>(
            "SELECT id, title, type, status, created_at, updated_at
             FROM items WHERE user_id = $1
             ORDER BY updated_at DESC
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Contexts with at least one active item, busiest first. The inner
    /// join is what excludes contexts with zero active items.
    pub async fn context_breakdown(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ContextBreakdown>, sqlx::Error> {
        sqlx::query_as::<_, ContextBreakdown>(
            "SELECT c.id, c.name, c.color, COUNT(i.id) AS active_items_count
             FROM contexts c
             JOIN items i ON i.context_id = c.id AND i.status = 'active'
             WHERE c.user_id = $1
             GROUP BY c.id, c.name, c.color
             ORDER BY active_items_count DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Active projects with counts and derived progress, soonest due
    /// first, projects without a due date last.
    pub async fn active_projects(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<ProjectProgress>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ProjectProgressRow>(
            "SELECT p.id, p.title, p.due_date,
                    COUNT(i.id) AS items_count,
                    COUNT(i.id) FILTER (WHERE i.status = 'active') AS active_items_count,
                    COUNT(i.id) FILTER (WHERE i.type = 'next_action' AND i.status = 'active')
                        AS next_actions_count,
                    COUNT(i.id) FILTER (WHERE i.status = 'completed') AS completed_items_count
             FROM projects p
             LEFT JOIN items i ON i.project_id = p.id
             WHERE p.user_id = $1 AND p.status = 'active'
             GROUP BY p.id
             ORDER BY p.due_date ASC NULLS LAST
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(ProjectProgress::from).collect())
    }

    /// Items and projects completed within the current week/month windows,
    /// keyed off the last-modified timestamp.
    pub async fn productivity(
        pool: &PgPool,
        user_id: DbId,
        week: TimeRange,
        month: TimeRange,
    ) -> Result<ProductivityStats, sqlx::Error> {
        sqlx::query_as::<_, ProductivityStats>(
            "SELECT
                (SELECT COUNT(*) FROM items
                 WHERE user_id = $1 AND status = 'completed'
                   AND updated_at >= $2 AND updated_at < $3) AS completed_this_week,
                (SELECT COUNT(*) FROM items
                 WHERE user_id = $1 AND status = 'completed'
                   AND updated_at >= $4 AND updated_at < $5) AS completed_this_month,
                (SELECT COUNT(*) FROM projects
                 WHERE user_id = $1 AND status = 'completed'
                   AND updated_at >= $4 AND updated_at < $5) AS projects_completed_this_month",
        )
        .bind(user_id)
        .bind(week.start)
        .bind(week.end)
        .bind(month.start)
        .bind(month.end)
        .fetch_one(pool)
        .await
    }

    /// Active next-action counts folded into the three energy buckets.
    /// Buckets with no items report zero.
    pub async fn next_actions_by_energy(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<EnergyBuckets, sqlx::Error> {
        let rows: Vec<(i32, i64)> = sqlx::query_as(
            "SELECT energy_level, COUNT(*) FROM items
             WHERE user_id = $1 AND type = 'next_action' AND status = 'active'
             GROUP BY energy_level",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        let mut buckets = EnergyBuckets::default();
        for (level, count) in rows {
            match EnergyBucket::from_level(level) {
                Some(EnergyBucket::Low) => buckets.low = count,
                Some(EnergyBucket::Medium) => buckets.medium = count,
                Some(EnergyBucket::High) => buckets.high = count,
                // CHECK constraint makes this unreachable; ignore rather
                // than fail the whole dashboard on dirty data.
                None => {}
            }
        }
        Ok(buckets)
    }

    /// Waiting-for items whose waiting_since is on or before the cutoff
    /// date, oldest first.
    pub async fn stale_waiting(
        pool: &PgPool,
        user_id: DbId,
        cutoff: NaiveDate,
        limit: i64,
    ) -> Result<Vec<WaitingFollowUp>, sqlx::Error> {
        sqlx::query_as::<_, WaitingFollowUp>(
            "SELECT id, title, waiting_for_person, waiting_since
             FROM items
             WHERE user_id = $1 AND type = 'waiting_for' AND status = 'active'
               AND waiting_since IS NOT NULL AND waiting_since <= $2
             ORDER BY waiting_since ASC
             LIMIT $3",
        )
        .bind(user_id)
        .bind(cutoff)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
