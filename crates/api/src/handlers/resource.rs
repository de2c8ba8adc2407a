//! Handlers for workspace inventory resources.
//!
//! Resources are embedded in the workspace row: every mutation loads the
//! aggregate through the ownership-scoped lookup, edits the collection in
//! memory, and rewrites it. The item status is re-derived by the classifier
//! on every add or update -- it is never taken from the client.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use siteguard_core::error::CoreError;
use siteguard_core::inventory::{
    classify, statistics, ResourceInput, ResourceItem, ResourceStatistics, ResourceUpdate,
};
use siteguard_core::types::DbId;
use siteguard_db::repositories::WorkspaceRepo;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::{resolve_workspace, workspace_not_found};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

const RESOURCE_NOT_FOUND: &str = "Resource not found";

fn resource_not_found() -> AppError {
    AppError::Core(CoreError::NotFound(RESOURCE_NOT_FOUND.into()))
}

/// Request body for `PATCH .../resources/{resource_id}/quantity`.
#[derive(Debug, Deserialize)]
pub struct QuantityRequest {
    pub quantity: Option<f64>,
}

// ---------------------------------------------------------------------------
// Collection endpoints
// ---------------------------------------------------------------------------

/// GET /workspaces/{workspace_id}/resources
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Vec<ResourceItem>>>> {
    let workspace = resolve_workspace(&state, workspace_id, auth.user_id).await?;
    Ok(Json(ApiResponse::new(
        "Resources retrieved",
        workspace.resources.0,
    )))
}

/// POST /workspaces/{workspace_id}/resources
pub async fn add(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
    Json(input): Json<ResourceInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<ResourceItem>>)> {
    input.validate().map_err(AppError::Validation)?;

    let workspace = resolve_workspace(&state, workspace_id, auth.user_id).await?;
    let mut resources = workspace.resources.0;
    let item = input.into_item();
    resources.push(item.clone());

    WorkspaceRepo::save_resources(&state.pool, workspace_id, auth.user_id, &resources)
        .await?
        .ok_or_else(workspace_not_found)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Resource added", item)),
    ))
}

/// PUT /workspaces/{workspace_id}/resources
///
/// Replace the entire collection. All-or-nothing: every incoming item is
/// validated before anything is written, so one invalid item leaves the
/// stored collection untouched.
pub async fn bulk_replace(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
    Json(input): Json<Vec<ResourceInput>>,
) -> AppResult<Json<ApiResponse<Vec<ResourceItem>>>> {
    let mut errors = Vec::new();
    for (index, item) in input.iter().enumerate() {
        if let Err(item_errors) = item.validate() {
            for msg in item_errors {
                errors.push(format!("item {index}: {msg}"));
            }
        }
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // Resolve after validation so a bad payload never touches the aggregate.
    resolve_workspace(&state, workspace_id, auth.user_id).await?;

    let resources: Vec<ResourceItem> = input.into_iter().map(ResourceInput::into_item).collect();

    let workspace =
        WorkspaceRepo::save_resources(&state.pool, workspace_id, auth.user_id, &resources)
            .await?
            .ok_or_else(workspace_not_found)?;

    Ok(Json(ApiResponse::new(
        "Resources replaced",
        workspace.resources.0,
    )))
}

/// GET /workspaces/{workspace_id}/resources/statistics
pub async fn get_statistics(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<ResourceStatistics>>> {
    let workspace = resolve_workspace(&state, workspace_id, auth.user_id).await?;
    let stats = statistics(&workspace.resources.0);
    Ok(Json(ApiResponse::new("Resource statistics", stats)))
}

// ---------------------------------------------------------------------------
// Item endpoints
// ---------------------------------------------------------------------------

/// GET /workspaces/{workspace_id}/resources/{resource_id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((workspace_id, resource_id)): Path<(DbId, Uuid)>,
) -> AppResult<Json<ApiResponse<ResourceItem>>> {
    let workspace = resolve_workspace(&state, workspace_id, auth.user_id).await?;
    let item = workspace
        .resources
        .0
        .into_iter()
        .find(|item| item.id == resource_id)
        .ok_or_else(resource_not_found)?;
    Ok(Json(ApiResponse::new("Resource retrieved", item)))
}

/// PUT /workspaces/{workspace_id}/resources/{resource_id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((workspace_id, resource_id)): Path<(DbId, Uuid)>,
    Json(input): Json<ResourceUpdate>,
) -> AppResult<Json<ApiResponse<ResourceItem>>> {
    input.validate().map_err(AppError::Validation)?;

    let workspace = resolve_workspace(&state, workspace_id, auth.user_id).await?;
    let mut resources = workspace.resources.0;
    let item = resources
        .iter_mut()
        .find(|item| item.id == resource_id)
        .ok_or_else(resource_not_found)?;

    input.apply(item);
    let updated = item.clone();

    WorkspaceRepo::save_resources(&state.pool, workspace_id, auth.user_id, &resources)
        .await?
        .ok_or_else(workspace_not_found)?;

    Ok(Json(ApiResponse::new("Resource updated", updated)))
}

/// DELETE /workspaces/{workspace_id}/resources/{resource_id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((workspace_id, resource_id)): Path<(DbId, Uuid)>,
) -> AppResult<StatusCode> {
    let workspace = resolve_workspace(&state, workspace_id, auth.user_id).await?;
    let mut resources = workspace.resources.0;
    let before = resources.len();
    resources.retain(|item| item.id != resource_id);
    if resources.len() == before {
        return Err(resource_not_found());
    }

    WorkspaceRepo::save_resources(&state.pool, workspace_id, auth.user_id, &resources)
        .await?
        .ok_or_else(workspace_not_found)?;

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /workspaces/{workspace_id}/resources/{resource_id}/quantity
pub async fn update_quantity(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((workspace_id, resource_id)): Path<(DbId, Uuid)>,
    Json(input): Json<QuantityRequest>,
) -> AppResult<Json<ApiResponse<ResourceItem>>> {
    let quantity = input
        .quantity
        .filter(|q| *q >= 0.0 && q.is_finite())
        .ok_or_else(|| AppError::BadRequest("quantity must be a non-negative number".into()))?;

    let workspace = resolve_workspace(&state, workspace_id, auth.user_id).await?;
    let mut resources = workspace.resources.0;
    let item = resources
        .iter_mut()
        .find(|item| item.id == resource_id)
        .ok_or_else(resource_not_found)?;

    item.quantity = quantity;
    item.status = classify(item.quantity, item.threshold);
    let updated = item.clone();

    WorkspaceRepo::save_resources(&state.pool, workspace_id, auth.user_id, &resources)
        .await?
        .ok_or_else(workspace_not_found)?;

    Ok(Json(ApiResponse::new("Resource quantity updated", updated)))
}
