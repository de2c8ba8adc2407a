//! Handlers for the `/workspaces` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use siteguard_core::inventory::default_resources;
use siteguard_core::types::DbId;
use siteguard_core::workspace::{progress_in_range, validate_name, WorkspaceStatus};
use siteguard_db::models::workspace::{CreateWorkspace, UpdateWorkspace, Workspace};
use siteguard_db::repositories::WorkspaceRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{resolve_workspace, workspace_not_found};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /workspaces`. All five fields are mandatory;
/// they are optional here only so absences surface as validation messages.
#[derive(Debug, Deserialize)]
pub struct CreateWorkspaceRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub stage: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub budget: Option<String>,
}

/// Request body for `PATCH /workspaces/{id}/progress`.
#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub progress: Option<i32>,
}

impl CreateWorkspaceRequest {
    /// Check all five fields and produce the validated command object.
    fn into_command(self) -> Result<CreateWorkspace, Vec<String>> {
        let mut errors = Vec::new();

        let name = self.name.unwrap_or_default();
        if name.trim().is_empty() {
            errors.push("name is required".to_string());
        } else if let Err(msg) = validate_name(&name) {
            errors.push(msg);
        }

        let location = self.location.unwrap_or_default();
        if location.trim().is_empty() {
            errors.push("location is required".to_string());
        }
        let stage = self.stage.unwrap_or_default();
        if stage.trim().is_empty() {
            errors.push("stage is required".to_string());
        }
        let kind = self.kind.unwrap_or_default();
        if kind.trim().is_empty() {
            errors.push("type is required".to_string());
        }
        let budget = self.budget.unwrap_or_default();
        if budget.trim().is_empty() {
            errors.push("budget is required".to_string());
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(CreateWorkspace {
            name,
            location,
            stage,
            kind,
            budget,
        })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /workspaces
///
/// Create a workspace with the seeded default inventory.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateWorkspaceRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Workspace>>)> {
    let command = input.into_command().map_err(AppError::Validation)?;

    let resources = default_resources();
    let workspace = WorkspaceRepo::create(&state.pool, auth.user_id, &command, &resources).await?;

    tracing::info!(
        workspace_id = workspace.id,
        owner_id = auth.user_id,
        "Workspace created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Workspace created", workspace)),
    ))
}

/// GET /workspaces
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Workspace>>>> {
    let workspaces = WorkspaceRepo::list_by_owner(&state.pool, auth.user_id).await?;
    Ok(Json(ApiResponse::new("Workspaces retrieved", workspaces)))
}

/// GET /workspaces/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Workspace>>> {
    let workspace = resolve_workspace(&state, id, auth.user_id).await?;
    Ok(Json(ApiResponse::new("Workspace retrieved", workspace)))
}

/// PUT /workspaces/{id}
///
/// Shallow-merge of the provided descriptive fields.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWorkspace>,
) -> AppResult<Json<ApiResponse<Workspace>>> {
    let workspace = WorkspaceRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or_else(workspace_not_found)?;
    Ok(Json(ApiResponse::new("Workspace updated", workspace)))
}

/// DELETE /workspaces/{id}
///
/// Removes the workspace and everything embedded in it.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = WorkspaceRepo::delete(&state.pool, id, auth.user_id).await?;
    if !deleted {
        return Err(workspace_not_found());
    }
    tracing::info!(workspace_id = id, owner_id = auth.user_id, "Workspace deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /workspaces/{id}/progress
pub async fn set_progress(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ProgressRequest>,
) -> AppResult<Json<ApiResponse<Workspace>>> {
    let progress = input
        .progress
        .filter(|value| progress_in_range(*value))
        .ok_or_else(|| AppError::BadRequest("progress must be between 0 and 100".into()))?;

    let workspace = WorkspaceRepo::set_progress(&state.pool, id, auth.user_id, progress)
        .await?
        .ok_or_else(workspace_not_found)?;
    Ok(Json(ApiResponse::new("Progress updated", workspace)))
}

/// PATCH /workspaces/{id}/status
///
/// Flip the lifecycle status. Completing a workspace forces progress to 100;
/// reopening leaves progress where it was.
pub async fn toggle_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Workspace>>> {
    let workspace = resolve_workspace(&state, id, auth.user_id).await?;

    let next = workspace.status.toggled();
    let forced_progress = match next {
        WorkspaceStatus::Finished => Some(100),
        WorkspaceStatus::UnderConstruction => None,
    };

    let workspace =
        WorkspaceRepo::set_status(&state.pool, id, auth.user_id, next.as_str(), forced_progress)
            .await?
            .ok_or_else(workspace_not_found)?;
    Ok(Json(ApiResponse::new("Workspace status updated", workspace)))
}
