//! Route definitions for the `/weekly-reviews` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

/// Routes mounted at `/weekly-reviews`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /current   -> current (persisted review or template)
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(review::list).post(review::create))
        .route("/current", get(review::current))
        .route(
            "/{id}",
            get(review::get_by_id)
                .put(review::update)
                .delete(review::delete),
        )
}
