//! Handlers for the `/items` resource: CRUD, the five GTD views, and the
//! clarify/complete workflow steps.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use gtd_core::classify::{GtdView, ItemStatus, ItemType};
use gtd_core::error::CoreError;
use gtd_core::types::DbId;
use gtd_db::models::item::{ClarifyItem, CreateItem, Item, ItemWithRefs, UpdateItem};
use gtd_db::repositories::{ContextRepo, ItemRepo, ProjectRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{ListItemsParams, ViewFilterParams};
use crate::state::AppState;

/// Verify that a referenced project and/or context belongs to the caller.
///
/// A reference to another user's row (or a nonexistent one) reads as not
/// found, never as forbidden.
async fn check_refs(
    state: &AppState,
    user_id: DbId,
    project_id: Option<DbId>,
    context_id: Option<DbId>,
) -> Result<(), AppError> {
    if let Some(id) = project_id {
        if !ProjectRepo::exists(&state.pool, user_id, id).await? {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Project",
                id,
            }));
        }
    }
    if let Some(id) = context_id {
        if !ContextRepo::exists(&state.pool, user_id, id).await? {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Context",
                id,
            }));
        }
    }
    Ok(())
}

/// POST /api/v1/items
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateItem>,
) -> AppResult<(StatusCode, Json<Item>)> {
    input.validate()?;
    check_refs(&state, user.user_id, input.project_id, input.context_id).await?;
    let item = ItemRepo::create(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/v1/items?type=&status=&context_id=
///
/// Status defaults to `active`.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ListItemsParams>,
) -> AppResult<Json<Vec<ItemWithRefs>>> {
    // Filtering by a context the caller does not own is a lookup failure,
    // not an empty result.
    check_refs(&state, user.user_id, None, params.context_id).await?;
    let status = params.status.unwrap_or(ItemStatus::Active);
    let items = ItemRepo::list(
        &state.pool,
        user.user_id,
        params.item_type,
        status,
        params.context_id,
    )
    .await?;
    Ok(Json(items))
}

/// GET /api/v1/items/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ItemWithRefs>> {
    let item = ItemRepo::find_with_refs(&state.pool, user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Item", id }))?;
    Ok(Json(item))
}

/// PUT /api/v1/items/{id}
///
/// An explicit `null` for a nullable field clears it; only concrete
/// project/context references need the ownership check.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateItem>,
) -> AppResult<Json<Item>> {
    input.validate()?;
    check_refs(
        &state,
        user.user_id,
        input.project_id.flatten(),
        input.context_id.flatten(),
    )
    .await?;
    let item = ItemRepo::update(&state.pool, user.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Item", id }))?;
    Ok(Json(item))
}

/// DELETE /api/v1/items/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ItemRepo::delete(&state.pool, user.user_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Item", id }))
    }
}

// ---------------------------------------------------------------------------
// Workflow steps
// ---------------------------------------------------------------------------

/// POST /api/v1/items/{id}/complete
///
/// Marks the item completed. The type is untouched, so completing a
/// reference item is allowed.
pub async fn complete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Item>> {
    let item = ItemRepo::complete(&state.pool, user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Item", id }))?;
    Ok(Json(item))
}

/// POST /api/v1/items/{id}/clarify
///
/// Moves an item out of (or between) the clarified types, optionally
/// organizing it under a project/context in the same step. Clarifying back
/// to `inbox` is rejected; re-clarifying an already-clarified item is fine.
pub async fn clarify(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ClarifyItem>,
) -> AppResult<Json<Item>> {
    input.validate()?;
    if input.item_type == ItemType::Inbox {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot clarify an item back to inbox".into(),
        )));
    }
    check_refs(&state, user.user_id, input.project_id, input.context_id).await?;
    let item = ItemRepo::clarify(&state.pool, user.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Item", id }))?;
    Ok(Json(item))
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

async fn list_view(
    state: &AppState,
    user_id: DbId,
    view: GtdView,
    params: &ViewFilterParams,
) -> AppResult<Json<Vec<ItemWithRefs>>> {
    // Filtering by a context the caller does not own is a lookup failure,
    // not an empty result.
    check_refs(state, user_id, None, params.context_id).await?;
    let items = ItemRepo::list_view(&state.pool, user_id, view, &params.to_filter()).await?;
    Ok(Json(items))
}

/// GET /api/v1/items/inbox
pub async fn inbox(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ViewFilterParams>,
) -> AppResult<Json<Vec<ItemWithRefs>>> {
    list_view(&state, user.user_id, GtdView::Inbox, &params).await
}

/// GET /api/v1/items/next-actions
pub async fn next_actions(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ViewFilterParams>,
) -> AppResult<Json<Vec<ItemWithRefs>>> {
    list_view(&state, user.user_id, GtdView::NextActions, &params).await
}

/// GET /api/v1/items/waiting-for
pub async fn waiting_for(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ViewFilterParams>,
) -> AppResult<Json<Vec<ItemWithRefs>>> {
    list_view(&state, user.user_id, GtdView::WaitingFor, &params).await
}

/// GET /api/v1/items/someday-maybe
pub async fn someday_maybe(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ViewFilterParams>,
) -> AppResult<Json<Vec<ItemWithRefs>>> {
    list_view(&state, user.user_id, GtdView::SomedayMaybe, &params).await
}

/// GET /api/v1/items/reference
pub async fn reference(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ViewFilterParams>,
) -> AppResult<Json<Vec<ItemWithRefs>>> {
    list_view(&state, user.user_id, GtdView::Reference, &params).await
}
