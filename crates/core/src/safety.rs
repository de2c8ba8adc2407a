//! Safety report value types and the derived workspace safety score.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Inclusive bounds for a report's risk score.
pub const RISK_SCORE_MIN: i32 = 0;
pub const RISK_SCORE_MAX: i32 = 100;

/// Severity tier of a single identified hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// A hazard identified during a site inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub description: String,
    pub severity: HazardSeverity,
    pub recommendation: String,
}

/// A dated risk assessment embedded in a workspace.
///
/// Reports are append-only history, newest first. The report date is a
/// calendar date, not a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyReport {
    pub id: Uuid,
    pub report_date: NaiveDate,
    pub risk_score: i32,
    pub hazards: Vec<Hazard>,
    pub summary: String,
}

/// Client input for saving a safety report. Id and date are server-assigned.
#[derive(Debug, Clone, Deserialize)]
pub struct SafetyReportInput {
    pub risk_score: i32,
    #[serde(default)]
    pub hazards: Vec<Hazard>,
    pub summary: String,
}

impl SafetyReportInput {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if !(RISK_SCORE_MIN..=RISK_SCORE_MAX).contains(&self.risk_score) {
            errors.push(format!(
                "risk_score must be between {RISK_SCORE_MIN} and {RISK_SCORE_MAX}"
            ));
        }
        for hazard in &self.hazards {
            if hazard.description.trim().is_empty() {
                errors.push("hazard description must not be empty".to_string());
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn into_report(self, report_date: NaiveDate) -> SafetyReport {
        SafetyReport {
            id: Uuid::new_v4(),
            report_date,
            risk_score: self.risk_score,
            hazards: self.hazards,
            summary: self.summary,
        }
    }
}

/// Workspace safety score derived from the most recently saved report.
///
/// Not an aggregate over history: only the just-saved report counts.
pub fn safety_score_from_risk(risk_score: i32) -> i32 {
    (100 - risk_score).max(0)
}
