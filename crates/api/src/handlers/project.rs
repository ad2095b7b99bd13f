//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use gtd_core::error::CoreError;
use gtd_core::types::DbId;
use gtd_db::models::item::ItemWithRefs;
use gtd_db::models::project::{CreateProject, Project, ProjectWithCounts, UpdateProject};
use gtd_db::repositories::{ItemRepo, ProjectRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ListProjectsParams;
use crate::state::AppState;

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    input.validate()?;
    let project = ProjectRepo::create(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects?status=
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ListProjectsParams>,
) -> AppResult<Json<Vec<ProjectWithCounts>>> {
    let projects =
        ProjectRepo::list_with_counts(&state.pool, user.user_id, params.status).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectWithCounts>> {
    let project = ProjectRepo::find_with_counts(&state.pool, user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// GET /api/v1/projects/{id}/next-actions
pub async fn next_actions(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<ItemWithRefs>>> {
    if !ProjectRepo::exists(&state.pool, user.user_id, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }
    let items = ItemRepo::next_actions_for_project(&state.pool, user.user_id, id).await?;
    Ok(Json(items))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    input.validate()?;
    let project = ProjectRepo::update(&state.pool, user.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Deleting a project also deletes its items (cascade).
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::delete(&state.pool, user.user_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}
