pub mod auth;
pub mod health;
pub mod workspace;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                                            signup (public)
/// /auth/login                                             login (public)
///
/// /workspaces                                             list, create
/// /workspaces/{id}                                        get, update, delete
/// /workspaces/{id}/progress                               set progress (PATCH)
/// /workspaces/{id}/status                                 toggle status (PATCH)
///
/// /workspaces/{workspace_id}/resources                    list, add, bulk replace
/// /workspaces/{workspace_id}/resources/statistics         statistics
/// /workspaces/{workspace_id}/resources/{id}               get, update, delete
/// /workspaces/{workspace_id}/resources/{id}/quantity      set quantity (PATCH)
///
/// /workspaces/{workspace_id}/architecture                 get, save, update, delete
/// /workspaces/{workspace_id}/architecture/sections        list, add
/// /workspaces/{workspace_id}/architecture/materials       list, add
/// /workspaces/{workspace_id}/architecture/stages          list, add
///
/// /workspaces/{workspace_id}/safety-reports               list, save
/// /workspaces/{workspace_id}/safety-reports/{id}          get
/// ```
///
/// Everything under `/workspaces` requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/workspaces", workspace::router())
}
