//! Project completion percentage.

/// Percentage of a project's items that are completed, rounded half-up.
///
/// A project with no items reports 0, not an error. The value is derived
/// on every read and never stored, so it always reflects the item counts
/// the caller just observed.
pub fn progress_percentage(completed_items: i64, total_items: i64) -> i32 {
    if total_items <= 0 {
        return 0;
    }
    // round(100 * completed / total) half-up, in integer arithmetic.
    ((completed_items * 200 + total_items) / (total_items * 2)) as i32
}
