//! Calendar windows for due-date queries.
//!
//! All windowing is evaluated in UTC, the system's reference timezone;
//! display formatting is a concern of API consumers. Weeks are ISO weeks
//! and start on Monday. Every function takes `now` explicitly so callers
//! (and tests) control the clock.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveTime};

use crate::classify::ItemStatus;
use crate::types::Timestamp;

/// A half-open instant range `[start, end)`.
///
/// Half-open ranges compose cleanly: the instant that ends one day (or
/// week, or month) is exactly the instant that starts the next, with no
/// gap and no overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeRange {
    pub fn contains(&self, instant: Timestamp) -> bool {
        self.start <= instant && instant < self.end
    }
}

fn midnight(date: NaiveDate) -> Timestamp {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// First day of the ISO week containing `date` (Monday).
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

/// The current UTC calendar day as a range.
pub fn day_range(now: Timestamp) -> TimeRange {
    let start = now.date_naive();
    TimeRange {
        start: midnight(start),
        end: midnight(start + Days::new(1)),
    }
}

/// The current ISO week (Monday through Sunday) as a range.
pub fn week_range(now: Timestamp) -> TimeRange {
    let start = week_start(now.date_naive());
    TimeRange {
        start: midnight(start),
        end: midnight(start + Days::new(7)),
    }
}

/// The current calendar month as a range.
pub fn month_range(now: Timestamp) -> TimeRange {
    let start = now.date_naive() - Days::new(u64::from(now.date_naive().day0()));
    TimeRange {
        start: midnight(start),
        end: midnight(start + Months::new(1)),
    }
}

/// Whether an item is overdue: has a due date strictly in the past and is
/// still active. Completed and cancelled items are never overdue.
pub fn is_overdue_item(due_date: Option<Timestamp>, status: ItemStatus, now: Timestamp) -> bool {
    status == ItemStatus::Active && due_date.is_some_and(|due| due < now)
}
