//! Weekly review entity model, DTOs, and the current-week tagged union.

use chrono::NaiveDate;
use gtd_core::review::ReviewChecklist;
use gtd_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `weekly_reviews` table.
///
/// `review_data` stays a raw JSON value on read so historical reviews
/// survive checklist shape changes; writes go through [`ReviewChecklist`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WeeklyReview {
    pub id: DbId,
    pub review_date: NaiveDate,
    pub review_data: serde_json::Value,
    pub notes: Option<String>,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Slim listing shape for review history.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewSummary {
    pub id: DbId,
    pub review_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for submitting a weekly review.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReview {
    pub review_date: NaiveDate,
    pub review_data: ReviewChecklist,
    pub notes: Option<String>,
}

/// DTO for amending a review after submission.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateReview {
    pub review_data: Option<ReviewChecklist>,
    pub notes: Option<String>,
}

/// The current week's review: either the persisted submission, or an
/// ephemeral template that is synthesized on demand and never written.
///
/// Modeled as a tagged union rather than a sentinel flag so template data
/// cannot be mistaken for (or accidentally written as) a persisted row.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurrentReview {
    Persisted(WeeklyReview),
    Template(ReviewTemplate),
}

/// An unsaved checklist for the current week, pre-filled with live list
/// counts. Has no id because it does not exist in the store.
#[derive(Debug, Serialize)]
pub struct ReviewTemplate {
    pub review_date: NaiveDate,
    pub review_data: ReviewChecklist,
    pub notes: Option<String>,
}
