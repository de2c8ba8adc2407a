//! Handlers for the workspace architecture plan.
//!
//! The plan is a singleton embedded in the workspace row. Reads on a
//! workspace without a plan yield `null` (or empty lists for the
//! sub-collections); mutations on a missing plan are a not-found condition.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use siteguard_core::error::CoreError;
use siteguard_core::plan::{
    validate_stage, ArchitecturePlan, PlanInput, PlanMaterial, PlanSection, PlanStage, PlanUpdate,
};
use siteguard_core::types::DbId;
use siteguard_db::repositories::WorkspaceRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{resolve_workspace, workspace_not_found};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

const PLAN_NOT_FOUND: &str =
    "No architecture plan exists for this workspace. Create the plan first.";

fn plan_not_found() -> AppError {
    AppError::Core(CoreError::NotFound(PLAN_NOT_FOUND.into()))
}

// ---------------------------------------------------------------------------
// Plan endpoints
// ---------------------------------------------------------------------------

/// GET /workspaces/{workspace_id}/architecture
///
/// Returns the plan, or `null` (not an error) when none has been saved.
pub async fn get(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Option<ArchitecturePlan>>>> {
    let workspace = resolve_workspace(&state, workspace_id, auth.user_id).await?;
    let plan = workspace.architecture_plan.map(|json| json.0);
    Ok(Json(ApiResponse::new("Architecture plan retrieved", plan)))
}

/// POST /workspaces/{workspace_id}/architecture
///
/// Save the full plan. Every collection must be present and non-empty.
/// Overwrites any existing plan.
pub async fn save(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
    Json(input): Json<PlanInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<ArchitecturePlan>>)> {
    input.validate().map_err(AppError::Validation)?;

    resolve_workspace(&state, workspace_id, auth.user_id).await?;

    let plan = input.into_plan(Utc::now());
    WorkspaceRepo::save_plan(&state.pool, workspace_id, auth.user_id, Some(&plan))
        .await?
        .ok_or_else(workspace_not_found)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Architecture plan saved", plan)),
    ))
}

/// PUT /workspaces/{workspace_id}/architecture
///
/// Partial field replacement on an existing plan. Provided-but-empty
/// collections and blank summaries are rejected.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
    Json(input): Json<PlanUpdate>,
) -> AppResult<Json<ApiResponse<ArchitecturePlan>>> {
    input.validate().map_err(AppError::Validation)?;

    let workspace = resolve_workspace(&state, workspace_id, auth.user_id).await?;
    let mut plan = workspace
        .architecture_plan
        .map(|json| json.0)
        .ok_or_else(plan_not_found)?;

    input.apply(&mut plan);

    WorkspaceRepo::save_plan(&state.pool, workspace_id, auth.user_id, Some(&plan))
        .await?
        .ok_or_else(workspace_not_found)?;

    Ok(Json(ApiResponse::new("Architecture plan updated", plan)))
}

/// DELETE /workspaces/{workspace_id}/architecture
///
/// Requires an existing plan. Returns 204 with no body.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let workspace = resolve_workspace(&state, workspace_id, auth.user_id).await?;
    if workspace.architecture_plan.is_none() {
        return Err(plan_not_found());
    }

    WorkspaceRepo::save_plan(&state.pool, workspace_id, auth.user_id, None)
        .await?
        .ok_or_else(workspace_not_found)?;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Sub-collection endpoints
// ---------------------------------------------------------------------------

/// GET /workspaces/{workspace_id}/architecture/sections
///
/// Empty list (not an error) when no plan exists.
pub async fn list_sections(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Vec<PlanSection>>>> {
    let workspace = resolve_workspace(&state, workspace_id, auth.user_id).await?;
    let sections = workspace
        .architecture_plan
        .map(|json| json.0.sections)
        .unwrap_or_default();
    Ok(Json(ApiResponse::new("Sections retrieved", sections)))
}

/// POST /workspaces/{workspace_id}/architecture/sections
pub async fn add_section(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
    Json(input): Json<PlanSection>,
) -> AppResult<(StatusCode, Json<ApiResponse<PlanSection>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Validation(vec![
            "title must not be empty".to_string()
        ]));
    }

    let workspace = resolve_workspace(&state, workspace_id, auth.user_id).await?;
    let mut plan = workspace
        .architecture_plan
        .map(|json| json.0)
        .ok_or_else(plan_not_found)?;

    plan.sections.push(input.clone());

    WorkspaceRepo::save_plan(&state.pool, workspace_id, auth.user_id, Some(&plan))
        .await?
        .ok_or_else(workspace_not_found)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Section added", input)),
    ))
}

/// GET /workspaces/{workspace_id}/architecture/materials
pub async fn list_materials(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Vec<PlanMaterial>>>> {
    let workspace = resolve_workspace(&state, workspace_id, auth.user_id).await?;
    let materials = workspace
        .architecture_plan
        .map(|json| json.0.materials)
        .unwrap_or_default();
    Ok(Json(ApiResponse::new("Materials retrieved", materials)))
}

/// POST /workspaces/{workspace_id}/architecture/materials
pub async fn add_material(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
    Json(input): Json<PlanMaterial>,
) -> AppResult<(StatusCode, Json<ApiResponse<PlanMaterial>>)> {
    let mut errors = Vec::new();
    if input.name.trim().is_empty() {
        errors.push("name must not be empty".to_string());
    }
    if input.quantity < 0.0 || !input.quantity.is_finite() {
        errors.push("quantity must be a non-negative number".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let workspace = resolve_workspace(&state, workspace_id, auth.user_id).await?;
    let mut plan = workspace
        .architecture_plan
        .map(|json| json.0)
        .ok_or_else(plan_not_found)?;

    plan.materials.push(input.clone());

    WorkspaceRepo::save_plan(&state.pool, workspace_id, auth.user_id, Some(&plan))
        .await?
        .ok_or_else(workspace_not_found)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Material added", input)),
    ))
}

/// GET /workspaces/{workspace_id}/architecture/stages
pub async fn list_stages(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Vec<PlanStage>>>> {
    let workspace = resolve_workspace(&state, workspace_id, auth.user_id).await?;
    let stages = workspace
        .architecture_plan
        .map(|json| json.0.stages)
        .unwrap_or_default();
    Ok(Json(ApiResponse::new("Stages retrieved", stages)))
}

/// POST /workspaces/{workspace_id}/architecture/stages
pub async fn add_stage(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
    Json(input): Json<PlanStage>,
) -> AppResult<(StatusCode, Json<ApiResponse<PlanStage>>)> {
    validate_stage(&input).map_err(AppError::Validation)?;

    let workspace = resolve_workspace(&state, workspace_id, auth.user_id).await?;
    let mut plan = workspace
        .architecture_plan
        .map(|json| json.0)
        .ok_or_else(plan_not_found)?;

    plan.stages.push(input.clone());

    WorkspaceRepo::save_plan(&state.pool, workspace_id, auth.user_id, Some(&plan))
        .await?
        .ok_or_else(workspace_not_found)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Stage added", input)),
    ))
}
