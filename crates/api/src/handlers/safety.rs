//! Handlers for workspace safety reports.
//!
//! Reports are append-only history embedded in the workspace row, newest
//! first. Saving a report rewrites the workspace safety score from that
//! single report -- it is not an aggregate over history.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use siteguard_core::error::CoreError;
use siteguard_core::safety::{safety_score_from_risk, SafetyReport, SafetyReportInput};
use siteguard_core::types::DbId;
use siteguard_db::repositories::WorkspaceRepo;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::{resolve_workspace, workspace_not_found};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

const REPORT_NOT_FOUND: &str = "Safety report not found";

/// GET /workspaces/{workspace_id}/safety-reports
///
/// Full history, newest first.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Vec<SafetyReport>>>> {
    let workspace = resolve_workspace(&state, workspace_id, auth.user_id).await?;
    Ok(Json(ApiResponse::new(
        "Safety reports retrieved",
        workspace.safety_reports.0,
    )))
}

/// POST /workspaces/{workspace_id}/safety-reports
///
/// Save a new report: assigns a generated id and today's date, prepends to
/// history, and recomputes the workspace safety score.
pub async fn save(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
    Json(input): Json<SafetyReportInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<SafetyReport>>)> {
    input.validate().map_err(AppError::Validation)?;

    let workspace = resolve_workspace(&state, workspace_id, auth.user_id).await?;

    let report = input.into_report(Utc::now().date_naive());
    let safety_score = safety_score_from_risk(report.risk_score);

    let mut reports = workspace.safety_reports.0;
    reports.insert(0, report.clone());

    WorkspaceRepo::save_safety_reports(
        &state.pool,
        workspace_id,
        auth.user_id,
        &reports,
        safety_score,
    )
    .await?
    .ok_or_else(workspace_not_found)?;

    tracing::info!(
        workspace_id,
        report_id = %report.id,
        risk_score = report.risk_score,
        safety_score,
        "Safety report saved"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Safety report saved", report)),
    ))
}

/// GET /workspaces/{workspace_id}/safety-reports/{report_id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((workspace_id, report_id)): Path<(DbId, Uuid)>,
) -> AppResult<Json<ApiResponse<SafetyReport>>> {
    let workspace = resolve_workspace(&state, workspace_id, auth.user_id).await?;
    let report = workspace
        .safety_reports
        .0
        .into_iter()
        .find(|report| report.id == report_id)
        .ok_or_else(|| AppError::Core(CoreError::NotFound(REPORT_NOT_FOUND.into())))?;
    Ok(Json(ApiResponse::new("Safety report retrieved", report)))
}
