//! Route definitions for the `/items` resource.
//!
//! The named view routes are static segments and take precedence over the
//! `/{id}` capture.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::item;
use crate::state::AppState;

/// Routes mounted at `/items`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /inbox           -> inbox view
/// GET    /next-actions    -> next-actions view
/// GET    /waiting-for     -> waiting-for view
/// GET    /someday-maybe   -> someday-maybe view
/// GET    /reference       -> reference view
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// POST   /{id}/complete   -> complete
/// POST   /{id}/clarify    -> clarify
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(item::list).post(item::create))
        .route("/inbox", get(item::inbox))
        .route("/next-actions", get(item::next_actions))
        .route("/waiting-for", get(item::waiting_for))
        .route("/someday-maybe", get(item::someday_maybe))
        .route("/reference", get(item::reference))
        .route(
            "/{id}",
            get(item::get_by_id).put(item::update).delete(item::delete),
        )
        .route("/{id}/complete", post(item::complete))
        .route("/{id}/clarify", post(item::clarify))
}
