//! GTD item classification: type/status enums, view predicates, and
//! composable filter specifications.
//!
//! A view is a pure predicate over an item's `(type, status)` pair. The
//! same predicates drive both the in-memory checks here and the SQL
//! `WHERE` clauses in `gtd-db`, so the two layers cannot drift apart in
//! what they consider "the inbox" or "a next action".

use serde::{Deserialize, Serialize};

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Enums (bound to the PostgreSQL enum types of the same name)
// ---------------------------------------------------------------------------

/// GTD item type. New items default to `Inbox` until clarified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "item_type", rename_all = "snake_case")]
pub enum ItemType {
    Inbox,
    NextAction,
    WaitingFor,
    SomedayMaybe,
    Reference,
}

/// Item lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "item_status", rename_all = "snake_case")]
pub enum ItemStatus {
    Active,
    Completed,
    Cancelled,
}

/// Project lifecycle status. Transitions are unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "project_status", rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
    Someday,
    Completed,
    Cancelled,
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// The five GTD views an item can be listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GtdView {
    Inbox,
    NextActions,
    WaitingFor,
    SomedayMaybe,
    Reference,
}

impl GtdView {
    /// The item type this view selects on.
    pub fn item_type(self) -> ItemType {
        match self {
            Self::Inbox => ItemType::Inbox,
            Self::NextActions => ItemType::NextAction,
            Self::WaitingFor => ItemType::WaitingFor,
            Self::SomedayMaybe => ItemType::SomedayMaybe,
            Self::Reference => ItemType::Reference,
        }
    }

    /// Whether membership additionally requires `status = active`.
    ///
    /// Reference material stays listed regardless of status; every other
    /// view only shows active items.
    pub fn requires_active(self) -> bool {
        !matches!(self, Self::Reference)
    }

    /// Evaluate the view predicate for one item.
    pub fn matches(self, item_type: ItemType, status: ItemStatus) -> bool {
        item_type == self.item_type() && (!self.requires_active() || status == ItemStatus::Active)
    }

    /// Classify an item into the view that claims it, if any.
    ///
    /// Active non-reference items land in exactly one view; completed or
    /// cancelled non-reference items land in none.
    pub fn of(item_type: ItemType, status: ItemStatus) -> Option<Self> {
        let view = match item_type {
            ItemType::Inbox => Self::Inbox,
            ItemType::NextAction => Self::NextActions,
            ItemType::WaitingFor => Self::WaitingFor,
            ItemType::SomedayMaybe => Self::SomedayMaybe,
            ItemType::Reference => Self::Reference,
        };
        view.matches(item_type, status).then_some(view)
    }
}

// ---------------------------------------------------------------------------
// Energy levels
// ---------------------------------------------------------------------------

/// Lowest valid energy level.
pub const ENERGY_MIN: i32 = 1;
/// Highest valid energy level.
pub const ENERGY_MAX: i32 = 3;
/// Energy level assigned when none is given.
pub const ENERGY_DEFAULT: i32 = 2;

/// Dashboard bucket for an energy level. The dashboard always reports all
/// three buckets, defaulting empty ones to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyBucket {
    Low,
    Medium,
    High,
}

impl EnergyBucket {
    /// Map a stored energy level (1..=3) to its bucket.
    pub fn from_level(level: i32) -> Option<Self> {
        match level {
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            _ => None,
        }
    }

    /// The stored level this bucket corresponds to.
    pub fn level(self) -> i32 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Immutable secondary filter specification, composable with any view.
///
/// All clauses are conjunctions. An unset field filters nothing. The
/// `max_minutes` clause excludes items with no time estimate: an item you
/// cannot size does not qualify for "things I can do in N minutes".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub context_id: Option<DbId>,
    pub energy_level: Option<i32>,
    pub max_minutes: Option<i32>,
}

impl ItemFilter {
    /// Evaluate the filter against one item's relevant fields.
    pub fn matches(
        &self,
        context_id: Option<DbId>,
        energy_level: i32,
        time_estimate: Option<i32>,
    ) -> bool {
        if let Some(wanted) = self.context_id {
            if context_id != Some(wanted) {
                return false;
            }
        }
        if let Some(level) = self.energy_level {
            if energy_level != level {
                return false;
            }
        }
        if let Some(max) = self.max_minutes {
            match time_estimate {
                Some(estimate) if estimate <= max => {}
                _ => return false,
            }
        }
        true
    }
}
