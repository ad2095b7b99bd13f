//! Weekly-review checklist types and staleness computation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A review is overdue once more than this many days have passed since
/// the last one. A gap of exactly seven days is still on time.
pub const REVIEW_OVERDUE_DAYS: i64 = 7;

/// Waiting-for items older than this many days surface on the dashboard
/// as follow-up candidates.
pub const WAITING_FOLLOW_UP_DAYS: i64 = 7;

/// The structured checklist captured by a weekly review submission.
///
/// Unknown booleans default to `false` and the project list to empty, so a
/// partially filled submission is still a valid checklist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewChecklist {
    #[serde(default)]
    pub completed_projects: Vec<String>,
    #[serde(default)]
    pub active_projects_reviewed: bool,
    #[serde(default)]
    pub someday_maybe_reviewed: bool,
    #[serde(default)]
    pub waiting_for_reviewed: bool,
    #[serde(default)]
    pub calendar_reviewed: bool,
    #[serde(default)]
    pub next_actions_updated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<ReviewStats>,
}

/// Point-in-time list counts embedded in a review template so the user
/// sees what they are about to review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewStats {
    pub inbox_count: i64,
    pub next_actions_count: i64,
    pub waiting_for_count: i64,
    pub someday_maybe_count: i64,
    pub active_projects_count: i64,
    pub overdue_items_count: i64,
}

/// Staleness summary reported on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewStatus {
    pub last_review_date: Option<NaiveDate>,
    pub days_since_last_review: Option<i64>,
    pub is_overdue: bool,
}

/// Compute review staleness from the most recent review date.
///
/// No prior review at all counts as overdue. Reviews dated in the future
/// (clock skew, pre-dated submissions) clamp to zero days.
pub fn review_status(last_review_date: Option<NaiveDate>, today: NaiveDate) -> ReviewStatus {
    match last_review_date {
        None => ReviewStatus {
            last_review_date: None,
            days_since_last_review: None,
            is_overdue: true,
        },
        Some(date) => {
            let days = (today - date).num_days().max(0);
            ReviewStatus {
                last_review_date: Some(date),
                days_since_last_review: Some(days),
                is_overdue: days > REVIEW_OVERDUE_DAYS,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_review_is_overdue() {
        let status = review_status(None, date(2026, 8, 26));
        assert!(status.is_overdue);
        assert_eq!(status.last_review_date, None);
        assert_eq!(status.days_since_last_review, None);
    }

    #[test]
    fn same_day_review_is_current() {
        let status = review_status(Some(date(2026, 8, 26)), date(2026, 8, 26));
        assert!(!status.is_overdue);
        assert_eq!(status.days_since_last_review, Some(0));
    }

    #[test]
    fn exactly_seven_days_is_not_overdue() {
        let status = review_status(Some(date(2026, 8, 19)), date(2026, 8, 26));
        assert_eq!(status.days_since_last_review, Some(7));
        assert!(!status.is_overdue);
    }

    #[test]
    fn eight_days_is_overdue() {
        let status = review_status(Some(date(2026, 8, 18)), date(2026, 8, 26));
        assert_eq!(status.days_since_last_review, Some(8));
        assert!(status.is_overdue);
    }

    #[test]
    fn future_dated_review_clamps_to_zero() {
        let status = review_status(Some(date(2026, 9, 1)), date(2026, 8, 26));
        assert_eq!(status.days_since_last_review, Some(0));
        assert!(!status.is_overdue);
    }

    #[test]
    fn checklist_deserializes_with_missing_fields() {
        let checklist: ReviewChecklist =
            serde_json::from_str(r#"{"calendar_reviewed": true}"#).unwrap();
        assert!(checklist.calendar_reviewed);
        assert!(!checklist.active_projects_reviewed);
        assert!(checklist.completed_projects.is_empty());
        assert!(checklist.stats.is_none());
    }
}
