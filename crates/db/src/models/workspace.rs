//! Workspace aggregate model and DTOs.
//!
//! The workspace row embeds its sub-collections (resources, architecture
//! plan, safety reports) as JSONB columns -- they have no tables of their
//! own and no lifecycle outside the aggregate. A missing architecture plan
//! is a SQL `NULL`, distinct from a plan with empty collections.

use serde::{Deserialize, Serialize};
use siteguard_core::inventory::ResourceItem;
use siteguard_core::plan::ArchitecturePlan;
use siteguard_core::safety::SafetyReport;
use siteguard_core::types::{DbId, Timestamp};
use siteguard_core::workspace::WorkspaceStatus;
use sqlx::types::Json;
use sqlx::FromRow;

/// A workspace row from the `workspaces` table, embedded collections
/// included.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Workspace {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub location: String,
    pub stage: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub budget: String,
    #[sqlx(try_from = "String")]
    pub status: WorkspaceStatus,
    pub progress: i32,
    pub safety_score: i32,
    pub resources: Json<Vec<ResourceItem>>,
    pub architecture_plan: Option<Json<ArchitecturePlan>>,
    pub safety_reports: Json<Vec<SafetyReport>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a workspace. All five fields are mandatory.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkspace {
    pub name: String,
    pub location: String,
    pub stage: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub budget: String,
}

/// DTO for updating a workspace. Only provided fields are merged; the
/// lifecycle status, progress, and derived fields have dedicated operations.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWorkspace {
    pub name: Option<String>,
    pub location: Option<String>,
    pub stage: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub budget: Option<String>,
}
