//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use gtd_core::classify::{ItemFilter, ItemStatus, ItemType, ProjectStatus};
use gtd_core::types::DbId;
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamp to a sane window: limit 1..=100 (default 20), offset >= 0.
    pub fn clamped(&self) -> (i64, i64) {
        let limit = self.limit.unwrap_or(20).clamp(1, 100);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

/// Secondary filter parameters accepted by every view endpoint
/// (`?context_id=&energy_level=&max_minutes=`).
#[derive(Debug, Deserialize)]
pub struct ViewFilterParams {
    pub context_id: Option<DbId>,
    pub energy_level: Option<i32>,
    pub max_minutes: Option<i32>,
}

impl ViewFilterParams {
    pub fn to_filter(&self) -> ItemFilter {
        ItemFilter {
            context_id: self.context_id,
            energy_level: self.energy_level,
            max_minutes: self.max_minutes,
        }
    }
}

/// Query parameters for the generic item listing
/// (`?type=&status=&context_id=`).
#[derive(Debug, Deserialize)]
pub struct ListItemsParams {
    #[serde(rename = "type")]
    pub item_type: Option<ItemType>,
    pub status: Option<ItemStatus>,
    pub context_id: Option<DbId>,
}

/// Query parameters for the project listing (`?status=`).
#[derive(Debug, Deserialize)]
pub struct ListProjectsParams {
    pub status: Option<ProjectStatus>,
}
