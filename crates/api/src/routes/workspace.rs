//! Route definitions for the `/workspaces` resource.
//!
//! Also nests resource, architecture-plan, and safety-report routes under
//! `/workspaces/{workspace_id}/...`.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{architecture, resource, safety, workspace};
use crate::state::AppState;

/// Routes mounted at `/workspaces`.
///
/// ```text
/// GET    /                                      -> list
/// POST   /                                      -> create
/// GET    /{id}                                  -> get_by_id
/// PUT    /{id}                                  -> update
/// DELETE /{id}                                  -> delete
/// PATCH  /{id}/progress                         -> set_progress
/// PATCH  /{id}/status                           -> toggle_status
///
/// GET    /{workspace_id}/resources              -> list
/// POST   /{workspace_id}/resources              -> add
/// PUT    /{workspace_id}/resources              -> bulk_replace
/// GET    /{workspace_id}/resources/statistics   -> get_statistics
/// GET    /{workspace_id}/resources/{id}         -> get_by_id
/// PUT    /{workspace_id}/resources/{id}         -> update
/// DELETE /{workspace_id}/resources/{id}         -> delete
/// PATCH  /{workspace_id}/resources/{id}/quantity -> update_quantity
///
/// GET    /{workspace_id}/architecture           -> get
/// POST   /{workspace_id}/architecture           -> save
/// PUT    /{workspace_id}/architecture           -> update
/// DELETE /{workspace_id}/architecture           -> delete
/// GET    /{workspace_id}/architecture/sections  -> list_sections
/// POST   /{workspace_id}/architecture/sections  -> add_section
/// GET    /{workspace_id}/architecture/materials -> list_materials
/// POST   /{workspace_id}/architecture/materials -> add_material
/// GET    /{workspace_id}/architecture/stages    -> list_stages
/// POST   /{workspace_id}/architecture/stages    -> add_stage
///
/// GET    /{workspace_id}/safety-reports         -> list
/// POST   /{workspace_id}/safety-reports         -> save
/// GET    /{workspace_id}/safety-reports/{id}    -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    let resource_routes = Router::new()
        .route(
            "/",
            get(resource::list)
                .post(resource::add)
                .put(resource::bulk_replace),
        )
        .route("/statistics", get(resource::get_statistics))
        .route(
            "/{resource_id}",
            get(resource::get_by_id)
                .put(resource::update)
                .delete(resource::delete),
        )
        .route("/{resource_id}/quantity", patch(resource::update_quantity));

    let architecture_routes = Router::new()
        .route(
            "/",
            get(architecture::get)
                .post(architecture::save)
                .put(architecture::update)
                .delete(architecture::delete),
        )
        .route(
            "/sections",
            get(architecture::list_sections).post(architecture::add_section),
        )
        .route(
            "/materials",
            get(architecture::list_materials).post(architecture::add_material),
        )
        .route(
            "/stages",
            get(architecture::list_stages).post(architecture::add_stage),
        );

    let safety_routes = Router::new()
        .route("/", get(safety::list).post(safety::save))
        .route("/{report_id}", get(safety::get_by_id));

    Router::new()
        .route("/", get(workspace::list).post(workspace::create))
        .route(
            "/{id}",
            get(workspace::get_by_id)
                .put(workspace::update)
                .delete(workspace::delete),
        )
        .route("/{id}/progress", patch(workspace::set_progress))
        .route("/{id}/status", patch(workspace::toggle_status))
        .nest("/{workspace_id}/resources", resource_routes)
        .nest("/{workspace_id}/architecture", architecture_routes)
        .nest("/{workspace_id}/safety-reports", safety_routes)
}
