//! Context entity model and DTOs.

use std::sync::LazyLock;

use gtd_core::types::{DbId, Timestamp};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Hex colour in `#RRGGBB` form.
static COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^#[0-9A-Fa-f]{6}$").expect("valid colour regex"));

/// Colour assigned when none is given.
pub const DEFAULT_COLOR: &str = "#3b82f6";

/// A row from the `contexts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Context {
    pub id: DbId,
    pub name: String,
    pub icon: Option<String>,
    pub color: String,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A context annotated with how many active items currently reference it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContextWithCount {
    pub id: DbId,
    pub name: String,
    pub icon: Option<String>,
    pub color: String,
    pub active_items_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a context.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContext {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 50))]
    pub icon: Option<String>,
    #[validate(regex(path = *COLOR_RE))]
    pub color: Option<String>,
}

/// DTO for updating a context. Omitted fields are left untouched.
///
/// `icon` is double-`Option`: `Some(None)` is an explicit JSON `null` and
/// clears the column.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateContext {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    #[validate(length(max = 50))]
    pub icon: Option<Option<String>>,
    #[validate(regex(path = *COLOR_RE))]
    pub color: Option<String>,
}
