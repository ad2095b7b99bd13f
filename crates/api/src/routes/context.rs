//! Route definitions for the `/contexts` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::context;
use crate::state::AppState;

/// Routes mounted at `/contexts`.
///
/// ```text
/// GET    /            -> list
/// POST   /            -> create
/// GET    /{id}        -> get_by_id
/// PUT    /{id}        -> update
/// DELETE /{id}        -> delete
/// GET    /{id}/items  -> list_items
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(context::list).post(context::create))
        .route(
            "/{id}",
            get(context::get_by_id)
                .put(context::update)
                .delete(context::delete),
        )
        .route("/{id}/items", get(context::list_items))
}
