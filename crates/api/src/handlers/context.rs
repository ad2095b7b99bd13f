//! Handlers for the `/contexts` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gtd_core::error::CoreError;
use gtd_core::types::DbId;
use gtd_db::models::context::{Context, ContextWithCount, CreateContext, UpdateContext};
use gtd_db::models::item::ItemWithRefs;
use gtd_db::repositories::{ContextRepo, ItemRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/contexts
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateContext>,
) -> AppResult<(StatusCode, Json<Context>)> {
    input.validate()?;
    let context = ContextRepo::create(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(context)))
}

/// GET /api/v1/contexts
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<ContextWithCount>>> {
    let contexts = ContextRepo::list_with_counts(&state.pool, user.user_id).await?;
    Ok(Json(contexts))
}

/// GET /api/v1/contexts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ContextWithCount>> {
    let context = ContextRepo::find_with_count(&state.pool, user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Context",
            id,
        }))?;
    Ok(Json(context))
}

/// GET /api/v1/contexts/{id}/items
///
/// Active items tagged with this context.
pub async fn list_items(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<ItemWithRefs>>> {
    if !ContextRepo::exists(&state.pool, user.user_id, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Context",
            id,
        }));
    }
    let items = ItemRepo::list_by_context(&state.pool, user.user_id, id).await?;
    Ok(Json(items))
}

/// PUT /api/v1/contexts/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContext>,
) -> AppResult<Json<Context>> {
    input.validate()?;
    let context = ContextRepo::update(&state.pool, user.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Context",
            id,
        }))?;
    Ok(Json(context))
}

/// DELETE /api/v1/contexts/{id}
///
/// Refuses to delete a context that still has linked items (any status);
/// the items must be re-tagged or removed first.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ContextRepo::exists(&state.pool, user.user_id, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Context",
            id,
        }));
    }

    let linked = ContextRepo::item_count(&state.pool, id).await?;
    if linked > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot delete context with {linked} linked item(s)"
        ))));
    }

    let deleted = ContextRepo::delete(&state.pool, user.user_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Context",
            id,
        }))
    }
}
