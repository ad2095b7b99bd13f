//! Handler for the `/dashboard` snapshot.

use axum::extract::State;
use axum::Json;
use chrono::{Days, Utc};
use gtd_core::review::{review_status, WAITING_FOLLOW_UP_DAYS};
use gtd_core::time::{day_range, month_range, week_range};
use gtd_db::models::dashboard::DashboardSnapshot;
use gtd_db::repositories::{DashboardRepo, ReviewRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Listing caps for the dashboard sections.
const OVERDUE_LIMIT: i64 = 5;
const DUE_TODAY_LIMIT: i64 = 5;
const DUE_WEEK_LIMIT: i64 = 10;
const RECENT_LIMIT: i64 = 10;
const PROJECTS_LIMIT: i64 = 5;
const WAITING_LIMIT: i64 = 5;

/// GET /api/v1/dashboard
///
/// All sections are computed from a single `now` so the windows agree, and
/// any failing sub-query fails the whole snapshot.
pub async fn snapshot(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DashboardSnapshot>> {
    let now = Utc::now();
    let today = now.date_naive();
    let pool = &state.pool;
    let user_id = user.user_id;

    let counts = DashboardRepo::view_counts(pool, user_id).await?;
    let overdue_items = DashboardRepo::overdue_items(pool, user_id, now, OVERDUE_LIMIT).await?;
    let due_today_items =
        DashboardRepo::due_in_range(pool, user_id, day_range(now), DUE_TODAY_LIMIT).await?;
    let due_this_week_items =
        DashboardRepo::due_in_range(pool, user_id, week_range(now), DUE_WEEK_LIMIT).await?;
    let recent_activity = DashboardRepo::recent_activity(pool, user_id, RECENT_LIMIT).await?;
    let context_breakdown = DashboardRepo::context_breakdown(pool, user_id).await?;
    let active_projects = DashboardRepo::active_projects(pool, user_id, PROJECTS_LIMIT).await?;

    let last_review = ReviewRepo::latest(pool, user_id).await?;
    let weekly_review_status = review_status(last_review.map(|r| r.review_date), today);

    let productivity_stats =
        DashboardRepo::productivity(pool, user_id, week_range(now), month_range(now)).await?;
    let next_actions_by_energy = DashboardRepo::next_actions_by_energy(pool, user_id).await?;

    let cutoff = today - Days::new(WAITING_FOLLOW_UP_DAYS as u64);
    let waiting_for_follow_up =
        DashboardRepo::stale_waiting(pool, user_id, cutoff, WAITING_LIMIT).await?;

    Ok(Json(DashboardSnapshot {
        counts,
        overdue_items,
        due_today_items,
        due_this_week_items,
        recent_activity,
        context_breakdown,
        active_projects,
        weekly_review_status,
        productivity_stats,
        next_actions_by_energy,
        waiting_for_follow_up,
        generated_at: now,
    }))
}
