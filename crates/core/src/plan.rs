//! Architecture plan value types and validation.
//!
//! A workspace holds at most one plan. The plan has no identity of its own:
//! it lives and dies with the workspace, and "no plan yet" is distinct from
//! a plan with empty collections (the latter is never valid).

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// A titled section of the construction plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSection {
    pub title: String,
    pub description: String,
}

/// A material requirement listed in the plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanMaterial {
    pub name: String,
    pub quantity: f64,
    pub specification: String,
}

/// A construction phase with its task list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanStage {
    pub phase: String,
    pub duration: String,
    pub tasks: Vec<String>,
}

/// The architecture plan embedded in a workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchitecturePlan {
    pub sections: Vec<PlanSection>,
    pub materials: Vec<PlanMaterial>,
    pub stages: Vec<PlanStage>,
    pub summary: String,
    pub created_at: Timestamp,
}

/// Full plan input: every collection required and non-empty.
///
/// Fields default to empty on parse so that an absent field surfaces as its
/// own validation message instead of a body rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanInput {
    #[serde(default)]
    pub sections: Vec<PlanSection>,
    #[serde(default)]
    pub materials: Vec<PlanMaterial>,
    #[serde(default)]
    pub stages: Vec<PlanStage>,
    #[serde(default)]
    pub summary: String,
}

impl PlanInput {
    /// Validate a full plan save, collecting one message per offending field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.sections.is_empty() {
            errors.push("sections must contain at least one entry".to_string());
        }
        if self.materials.is_empty() {
            errors.push("materials must contain at least one entry".to_string());
        }
        if self.stages.is_empty() {
            errors.push("stages must contain at least one entry".to_string());
        }
        for stage in &self.stages {
            if stage.tasks.is_empty() {
                errors.push(format!("stage '{}' must list at least one task", stage.phase));
            }
        }
        if self.summary.trim().is_empty() {
            errors.push("summary must not be blank".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn into_plan(self, created_at: Timestamp) -> ArchitecturePlan {
        ArchitecturePlan {
            sections: self.sections,
            materials: self.materials,
            stages: self.stages,
            summary: self.summary,
            created_at,
        }
    }
}

/// Partial plan update. A provided field replaces the stored one wholesale;
/// provided-but-empty collections and blank summaries are rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanUpdate {
    pub sections: Option<Vec<PlanSection>>,
    pub materials: Option<Vec<PlanMaterial>>,
    pub stages: Option<Vec<PlanStage>>,
    pub summary: Option<String>,
}

impl PlanUpdate {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if let Some(sections) = &self.sections {
            if sections.is_empty() {
                errors.push("sections must contain at least one entry".to_string());
            }
        }
        if let Some(materials) = &self.materials {
            if materials.is_empty() {
                errors.push("materials must contain at least one entry".to_string());
            }
        }
        if let Some(stages) = &self.stages {
            if stages.is_empty() {
                errors.push("stages must contain at least one entry".to_string());
            }
            for stage in stages {
                if stage.tasks.is_empty() {
                    errors.push(format!("stage '{}' must list at least one task", stage.phase));
                }
            }
        }
        if let Some(summary) = &self.summary {
            if summary.trim().is_empty() {
                errors.push("summary must not be blank".to_string());
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Replace the provided fields on `plan`.
    pub fn apply(self, plan: &mut ArchitecturePlan) {
        if let Some(sections) = self.sections {
            plan.sections = sections;
        }
        if let Some(materials) = self.materials {
            plan.materials = materials;
        }
        if let Some(stages) = self.stages {
            plan.stages = stages;
        }
        if let Some(summary) = self.summary {
            plan.summary = summary;
        }
    }
}

/// Validate a single stage appended to an existing plan.
pub fn validate_stage(stage: &PlanStage) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    if stage.phase.trim().is_empty() {
        errors.push("phase must not be empty".to_string());
    }
    if stage.tasks.is_empty() {
        errors.push(format!("stage '{}' must list at least one task", stage.phase));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
