//! Entity models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts (with `validator` rules)
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod context;
pub mod dashboard;
pub mod item;
pub mod project;
pub mod review;
pub mod user;

/// Deserializer for double-`Option` update fields: a field that is present
/// in the payload — even as an explicit `null` — lands as `Some(inner)`,
/// while an absent field stays `None` via `#[serde(default)]`.
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(de).map(Some)
}
