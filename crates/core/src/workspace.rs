//! Workspace lifecycle rules and field bounds.

use serde::{Deserialize, Serialize};

/// Workspace name length bounds (inclusive).
pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 100;

/// Inclusive bounds for workspace progress.
pub const PROGRESS_MIN: i32 = 0;
pub const PROGRESS_MAX: i32 = 100;

/// Safety score assigned to a freshly created workspace.
pub const INITIAL_SAFETY_SCORE: i32 = 100;

/// Lifecycle status of a construction workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceStatus {
    UnderConstruction,
    Finished,
}

impl WorkspaceStatus {
    /// Stable text form, used both on the wire and in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            WorkspaceStatus::UnderConstruction => "under_construction",
            WorkspaceStatus::Finished => "finished",
        }
    }

    /// The opposite lifecycle state. Completing a workspace forces progress
    /// to 100 at the call site; reopening leaves progress untouched.
    pub fn toggled(self) -> Self {
        match self {
            WorkspaceStatus::UnderConstruction => WorkspaceStatus::Finished,
            WorkspaceStatus::Finished => WorkspaceStatus::UnderConstruction,
        }
    }
}

/// A status string in storage that matches no known lifecycle state.
#[derive(Debug, thiserror::Error)]
#[error("unknown workspace status '{0}'")]
pub struct ParseStatusError(String);

impl TryFrom<String> for WorkspaceStatus {
    type Error = ParseStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "under_construction" => Ok(WorkspaceStatus::UnderConstruction),
            "finished" => Ok(WorkspaceStatus::Finished),
            _ => Err(ParseStatusError(value)),
        }
    }
}

/// Validate a workspace name against the length bounds.
pub fn validate_name(name: &str) -> Result<(), String> {
    let len = name.trim().chars().count();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        return Err(format!(
            "name must be between {NAME_MIN_LEN} and {NAME_MAX_LEN} characters"
        ));
    }
    Ok(())
}

/// Check a progress value against the inclusive 0..=100 range.
pub fn progress_in_range(value: i32) -> bool {
    (PROGRESS_MIN..=PROGRESS_MAX).contains(&value)
}
