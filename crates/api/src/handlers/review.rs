//! Handlers for the `/weekly-reviews` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use gtd_core::error::CoreError;
use gtd_core::review::{ReviewChecklist, ReviewStats};
use gtd_core::time::week_start;
use gtd_core::types::DbId;
use gtd_db::models::review::{
    CreateReview, CurrentReview, ReviewSummary, ReviewTemplate, UpdateReview, WeeklyReview,
};
use gtd_db::repositories::{DashboardRepo, ReviewRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::state::AppState;

/// POST /api/v1/weekly-reviews
///
/// One review per date per user. The pre-check gives a clean conflict
/// message; the unique constraint backs it against races.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateReview>,
) -> AppResult<(StatusCode, Json<WeeklyReview>)> {
    input.validate()?;

    if ReviewRepo::find_by_date(&state.pool, user.user_id, input.review_date)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A review for {} already exists",
            input.review_date
        ))));
    }

    let review = ReviewRepo::create(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// GET /api/v1/weekly-reviews?limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<ReviewSummary>>> {
    let (limit, offset) = params.clamped();
    let reviews = ReviewRepo::list_summaries(&state.pool, user.user_id, limit, offset).await?;
    Ok(Json(reviews))
}

/// GET /api/v1/weekly-reviews/current
///
/// The review for the current ISO week if one was submitted, otherwise an
/// ephemeral template pre-filled with live list counts. The template is
/// never written; submitting it goes through the regular create endpoint.
pub async fn current(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<CurrentReview>> {
    let now = Utc::now();
    let review_date = week_start(now.date_naive());

    if let Some(review) = ReviewRepo::find_by_date(&state.pool, user.user_id, review_date).await? {
        return Ok(Json(CurrentReview::Persisted(review)));
    }

    let counts = DashboardRepo::view_counts(&state.pool, user.user_id).await?;
    let overdue = DashboardRepo::overdue_count(&state.pool, user.user_id, now).await?;

    let template = ReviewTemplate {
        review_date,
        review_data: ReviewChecklist {
            stats: Some(ReviewStats {
                inbox_count: counts.inbox,
                next_actions_count: counts.next_actions,
                waiting_for_count: counts.waiting_for,
                someday_maybe_count: counts.someday_maybe,
                active_projects_count: counts.active_projects,
                overdue_items_count: overdue,
            }),
            ..ReviewChecklist::default()
        },
        notes: None,
    };
    Ok(Json(CurrentReview::Template(template)))
}

/// GET /api/v1/weekly-reviews/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<WeeklyReview>> {
    let review = ReviewRepo::find_by_id(&state.pool, user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WeeklyReview",
            id,
        }))?;
    Ok(Json(review))
}

/// PUT /api/v1/weekly-reviews/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReview>,
) -> AppResult<Json<WeeklyReview>> {
    input.validate()?;
    let review = ReviewRepo::update(&state.pool, user.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WeeklyReview",
            id,
        }))?;
    Ok(Json(review))
}

/// DELETE /api/v1/weekly-reviews/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ReviewRepo::delete(&state.pool, user.user_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "WeeklyReview",
            id,
        }))
    }
}
