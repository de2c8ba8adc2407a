//! Repository for the `workspaces` table.
//!
//! Every read and write is scoped by `(id, owner_id)` in a single query --
//! ownership is never checked by fetch-then-compare, so a caller cannot
//! distinguish "exists but not yours" from "does not exist". Embedded
//! collections are rewritten wholesale by the `save_*` methods after the
//! handler has mutated the loaded aggregate in memory.

use siteguard_core::inventory::ResourceItem;
use siteguard_core::plan::ArchitecturePlan;
use siteguard_core::safety::SafetyReport;
use siteguard_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::workspace::{CreateWorkspace, UpdateWorkspace, Workspace};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, location, stage, kind, budget, status, progress, \
                       safety_score, resources, architecture_plan, safety_reports, \
                       created_at, updated_at";

/// Provides CRUD operations for workspaces and their embedded collections.
pub struct WorkspaceRepo;

impl WorkspaceRepo {
    /// Insert a new workspace with the seeded default inventory.
    ///
    /// Status, progress, and safety score take their column defaults
    /// (`under_construction`, 0, 100).
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateWorkspace,
        resources: &[ResourceItem],
    ) -> Result<Workspace, sqlx::Error> {
        let query = format!(
            "INSERT INTO workspaces (owner_id, name, location, stage, kind, budget, resources)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workspace>(&query)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.location)
            .bind(&input.stage)
            .bind(&input.kind)
            .bind(&input.budget)
            .bind(Json(resources))
            .fetch_one(pool)
            .await
    }

    /// List all workspaces owned by a user, most recently created first.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<Workspace>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workspaces WHERE owner_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Workspace>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch a workspace only if it is owned by `owner_id`.
    ///
    /// Returns `None` both for an unknown id and for an id owned by someone
    /// else -- the two cases are indistinguishable by design.
    pub async fn find_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Workspace>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workspaces WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Workspace>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Shallow-merge the provided descriptive fields. Returns `None` if the
    /// workspace is absent or not owned by `owner_id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateWorkspace,
    ) -> Result<Option<Workspace>, sqlx::Error> {
        let query = format!(
            "UPDATE workspaces SET
                name = COALESCE($3, name),
                location = COALESCE($4, location),
                stage = COALESCE($5, stage),
                kind = COALESCE($6, kind),
                budget = COALESCE($7, budget),
                updated_at = NOW()
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workspace>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.location)
            .bind(&input.stage)
            .bind(&input.kind)
            .bind(&input.budget)
            .fetch_optional(pool)
            .await
    }

    /// Delete a workspace and everything embedded in it.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, owner_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM workspaces WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the progress value (caller validates the 0..=100 range).
    pub async fn set_progress(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        progress: i32,
    ) -> Result<Option<Workspace>, sqlx::Error> {
        let query = format!(
            "UPDATE workspaces SET progress = $3, updated_at = NOW()
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workspace>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(progress)
            .fetch_optional(pool)
            .await
    }

    /// Set the lifecycle status, optionally forcing progress in the same
    /// write (completing a workspace pins progress at 100).
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        status: &str,
        progress: Option<i32>,
    ) -> Result<Option<Workspace>, sqlx::Error> {
        let query = format!(
            "UPDATE workspaces SET status = $3, progress = COALESCE($4, progress), updated_at = NOW()
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workspace>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(status)
            .bind(progress)
            .fetch_optional(pool)
            .await
    }

    /// Rewrite the embedded resource collection.
    pub async fn save_resources(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        resources: &[ResourceItem],
    ) -> Result<Option<Workspace>, sqlx::Error> {
        let query = format!(
            "UPDATE workspaces SET resources = $3, updated_at = NOW()
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workspace>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(Json(resources))
            .fetch_optional(pool)
            .await
    }

    /// Rewrite the embedded architecture plan. `None` clears it.
    pub async fn save_plan(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        plan: Option<&ArchitecturePlan>,
    ) -> Result<Option<Workspace>, sqlx::Error> {
        let query = format!(
            "UPDATE workspaces SET architecture_plan = $3, updated_at = NOW()
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workspace>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(plan.map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Rewrite the safety report history and the derived safety score in a
    /// single statement.
    pub async fn save_safety_reports(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        reports: &[SafetyReport],
        safety_score: i32,
    ) -> Result<Option<Workspace>, sqlx::Error> {
        let query = format!(
            "UPDATE workspaces SET safety_reports = $3, safety_score = $4, updated_at = NOW()
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workspace>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(Json(reports))
            .bind(safety_score)
            .fetch_optional(pool)
            .await
    }
}
