use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// Cross-owner access is deliberately reported as `NotFound`, never as a
/// forbidden/permission error, so callers cannot probe for the existence
/// of another user's entities.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
