//! Item entity model and DTOs.
//!
//! Items are the atomic GTD unit. List endpoints return [`ItemWithRefs`],
//! which carries denormalized project and context display data so clients
//! do not need follow-up requests.

use chrono::NaiveDate;
use gtd_core::classify::{ItemStatus, ItemType};
use gtd_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub status: ItemStatus,
    pub due_date: Option<Timestamp>,
    pub reminder_date: Option<Timestamp>,
    pub energy_level: i32,
    pub time_estimate: Option<i32>,
    pub notes: Option<String>,
    pub user_id: DbId,
    pub project_id: Option<DbId>,
    pub context_id: Option<DbId>,
    pub waiting_for_person: Option<String>,
    pub waiting_since: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Project display data attached to an item.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectRef {
    pub id: DbId,
    pub title: String,
}

/// Context display data attached to an item.
#[derive(Debug, Clone, Serialize)]
pub struct ContextRef {
    pub id: DbId,
    pub name: String,
    pub color: String,
}

/// An item joined with its project title and context name/colour.
#[derive(Debug, Clone, FromRow)]
pub struct ItemRefsRow {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(rename = "type")]
    pub item_type: ItemType,
    pub status: ItemStatus,
    pub due_date: Option<Timestamp>,
    pub reminder_date: Option<Timestamp>,
    pub energy_level: i32,
    pub time_estimate: Option<i32>,
    pub notes: Option<String>,
    pub project_id: Option<DbId>,
    pub context_id: Option<DbId>,
    pub waiting_for_person: Option<String>,
    pub waiting_since: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub project_title: Option<String>,
    pub context_name: Option<String>,
    pub context_color: Option<String>,
}

/// API shape of an item with nested project/context references.
#[derive(Debug, Clone, Serialize)]
pub struct ItemWithRefs {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub status: ItemStatus,
    pub due_date: Option<Timestamp>,
    pub reminder_date: Option<Timestamp>,
    pub energy_level: i32,
    pub time_estimate: Option<i32>,
    pub notes: Option<String>,
    pub project: Option<ProjectRef>,
    pub context: Option<ContextRef>,
    pub waiting_for_person: Option<String>,
    pub waiting_since: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ItemRefsRow> for ItemWithRefs {
    fn from(row: ItemRefsRow) -> Self {
        let project = match (row.project_id, row.project_title) {
            (Some(id), Some(title)) => Some(ProjectRef { id, title }),
            _ => None,
        };
        let context = match (row.context_id, row.context_name, row.context_color) {
            (Some(id), Some(name), Some(color)) => Some(ContextRef { id, name, color }),
            _ => None,
        };
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            item_type: row.item_type,
            status: row.status,
            due_date: row.due_date,
            reminder_date: row.reminder_date,
            energy_level: row.energy_level,
            time_estimate: row.time_estimate,
            notes: row.notes,
            project,
            context,
            waiting_for_person: row.waiting_for_person,
            waiting_since: row.waiting_since,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for capturing a new item. Type defaults to `inbox`, status to
/// `active`, energy level to 2.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateItem {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<ItemType>,
    pub due_date: Option<Timestamp>,
    pub reminder_date: Option<Timestamp>,
    #[validate(range(min = 1, max = 3))]
    pub energy_level: Option<i32>,
    #[validate(range(min = 1))]
    pub time_estimate: Option<i32>,
    pub notes: Option<String>,
    pub project_id: Option<DbId>,
    pub context_id: Option<DbId>,
    #[validate(length(max = 255))]
    pub waiting_for_person: Option<String>,
    pub waiting_since: Option<NaiveDate>,
}

/// DTO for updating an item. Omitted fields are left untouched; `status`
/// is the only path to `cancelled`.
///
/// Nullable fields are double-`Option`: `None` means the field was absent
/// from the payload, `Some(None)` means an explicit JSON `null` and clears
/// the column (detach from a project/context, drop a due date).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateItem {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub description: Option<Option<String>>,
    #[serde(rename = "type")]
    pub item_type: Option<ItemType>,
    pub status: Option<ItemStatus>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub due_date: Option<Option<Timestamp>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub reminder_date: Option<Option<Timestamp>>,
    #[validate(range(min = 1, max = 3))]
    pub energy_level: Option<i32>,
    #[serde(default, deserialize_with = "super::double_option")]
    #[validate(range(min = 1))]
    pub time_estimate: Option<Option<i32>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub project_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub context_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "super::double_option")]
    #[validate(length(max = 255))]
    pub waiting_for_person: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub waiting_since: Option<Option<NaiveDate>>,
}

/// DTO for the clarify workflow step: move an inbox (or any) item into one
/// of the four clarified types, optionally organizing it at the same time.
///
/// Re-clarifying an already-clarified item is allowed; the target type just
/// cannot be `inbox` (that is what the item started as).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClarifyItem {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub project_id: Option<DbId>,
    pub context_id: Option<DbId>,
    #[validate(length(max = 255))]
    pub waiting_for_person: Option<String>,
    pub waiting_since: Option<NaiveDate>,
}
