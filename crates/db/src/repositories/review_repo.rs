//! Repository for the `weekly_reviews` table.

use chrono::NaiveDate;
use gtd_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{CreateReview, ReviewSummary, UpdateReview, WeeklyReview};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, review_date, review_data, notes, user_id, created_at, updated_at";

/// Provides CRUD operations for weekly reviews, always scoped to one owner.
///
/// The one-review-per-date invariant is enforced twice: handlers pre-check
/// with [`ReviewRepo::find_by_date`] for a clean conflict message, and the
/// `uq_weekly_reviews_user_date` constraint backs it against races.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a new review submission.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateReview,
    ) -> Result<WeeklyReview, sqlx::Error> {
        let data = serde_json::to_value(&input.review_data)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let query = format!(
            "INSERT INTO weekly_reviews (review_date, review_data, notes, user_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WeeklyReview>(&query)
            .bind(input.review_date)
            .bind(data)
            .bind(&input.notes)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<WeeklyReview>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM weekly_reviews WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, WeeklyReview>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find the review for an exact date, if one was submitted.
    pub async fn find_by_date(
        pool: &PgPool,
        user_id: DbId,
        review_date: NaiveDate,
    ) -> Result<Option<WeeklyReview>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM weekly_reviews WHERE user_id = $1 AND review_date = $2"
        );
        sqlx::query_as::<_, WeeklyReview>(&query)
            .bind(user_id)
            .bind(review_date)
            .fetch_optional(pool)
            .await
    }

    /// The most recent review by review date, if any.
    pub async fn latest(pool: &PgPool, user_id: DbId) -> Result<Option<WeeklyReview>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM weekly_reviews WHERE user_id = $1
             ORDER BY review_date DESC LIMIT 1"
        );
        sqlx::query_as::<_, WeeklyReview>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Review history, newest first.
    pub async fn list_summaries(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ReviewSummary>, sqlx::Error> {
        sqlx::query_as::<_, ReviewSummary>(
            "SELECT id, review_date, notes, created_at
             FROM weekly_reviews WHERE user_id = $1
             ORDER BY review_date DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Amend a review's checklist or notes after submission.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateReview,
    ) -> Result<Option<WeeklyReview>, sqlx::Error> {
        let data = input
            .review_data
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let query = format!(
            "UPDATE weekly_reviews SET
                review_data = COALESCE($3, review_data),
                notes = COALESCE($4, notes)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WeeklyReview>(&query)
            .bind(id)
            .bind(user_id)
            .bind(data)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a review. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM weekly_reviews WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
