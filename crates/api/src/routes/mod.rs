pub mod auth;
pub mod context;
pub mod dashboard;
pub mod health;
pub mod item;
pub mod project;
pub mod review;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/me                             current account (requires auth)
///
/// /contexts                            list, create
/// /contexts/{id}                       get, update, delete (blocked while items linked)
/// /contexts/{id}/items                 active items tagged with the context
///
/// /projects                            list (?status=), create
/// /projects/{id}                       get, update, delete (cascades to items)
/// /projects/{id}/next-actions          the project's active next actions
///
/// /items                               list (?type=&status=&context_id=), create
/// /items/inbox                         inbox view
/// /items/next-actions                  next-actions view
/// /items/waiting-for                   waiting-for view
/// /items/someday-maybe                 someday-maybe view
/// /items/reference                     reference view (any status)
/// /items/{id}                          get, update, delete
/// /items/{id}/complete                 mark completed (POST)
/// /items/{id}/clarify                  assign a clarified type (POST)
///
/// /weekly-reviews                      history (?limit=&offset=), create
/// /weekly-reviews/current              this week's review or a template
/// /weekly-reviews/{id}                 get, update, delete
///
/// /dashboard                           composite snapshot (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication (register, login, me).
        .nest("/auth", auth::router())
        // Context CRUD and per-context item listing.
        .nest("/contexts", context::router())
        // Project CRUD and per-project next actions.
        .nest("/projects", project::router())
        // Item CRUD, the five GTD views, and workflow steps.
        .nest("/items", item::router())
        // Weekly review history and the current-week endpoint.
        .nest("/weekly-reviews", review::router())
        // Read-only composite dashboard.
        .nest("/dashboard", dashboard::router())
}
