//! Route definition for the `/dashboard` snapshot.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET / -> snapshot
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard::snapshot))
}
