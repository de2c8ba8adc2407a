//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers resolve the workspace through the ownership-scoped repository
//! lookup, apply domain rules from `siteguard_core`, and persist via
//! `siteguard_db`, mapping errors via [`AppError`](crate::error::AppError).

pub mod architecture;
pub mod auth;
pub mod resource;
pub mod safety;
pub mod workspace;

use siteguard_core::error::CoreError;
use siteguard_core::types::DbId;
use siteguard_db::models::workspace::Workspace;
use siteguard_db::repositories::WorkspaceRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// The message returned whenever a workspace cannot be resolved for the
/// caller. Deliberately identical for "does not exist" and "not yours".
pub(crate) const WORKSPACE_NOT_FOUND: &str = "Workspace not found";

pub(crate) fn workspace_not_found() -> AppError {
    AppError::Core(CoreError::NotFound(WORKSPACE_NOT_FOUND.into()))
}

/// Resolve a workspace scoped to its owner, in a single query.
///
/// Every workspace-scoped operation goes through here before touching the
/// aggregate.
pub(crate) async fn resolve_workspace(
    state: &AppState,
    id: DbId,
    owner_id: DbId,
) -> AppResult<Workspace> {
    WorkspaceRepo::find_for_owner(&state.pool, id, owner_id)
        .await?
        .ok_or_else(workspace_not_found)
}
