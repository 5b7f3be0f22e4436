#![forbid(unsafe_code)]

//! Assembly of the evaluation result artifact

use crate::engine::outcome::{Finding, Outcome, Warning};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Overall verdict of a gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Passed,
    Failed,
}

impl Status {
    pub fn from_passed(passed: bool) -> Self {
        if passed { Status::Passed } else { Status::Failed }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Passed => "passed",
            Status::Failed => "failed",
        }
    }
}

/// Counts reported alongside the findings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_prompts: usize,
    pub findings_count: usize,
    pub warnings_count: usize,
    pub patterns_config_version: String,
}

/// The adversarial evaluation artifact
///
/// `status` and `passed` are both derived from `findings` at assembly time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub status: Status,
    pub timestamp: DateTime<Utc>,
    pub summary: Summary,
    pub findings: Vec<Finding>,
    pub warnings: Vec<Warning>,
    pub passed: bool,
}

impl EvaluationResult {
    /// Build the result from the collected outcome of a run
    pub fn assemble(
        outcome: Outcome,
        total_prompts: usize,
        config_version: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let (findings, warnings) = outcome.into_parts();
        let passed = findings.is_empty();

        Self {
            status: Status::from_passed(passed),
            timestamp,
            summary: Summary {
                total_prompts,
                findings_count: findings.len(),
                warnings_count: warnings.len(),
                patterns_config_version: config_version.into(),
            },
            findings,
            warnings,
            passed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use crate::engine::outcome::Diagnostic;

    #[test]
    fn test_diagnostics_alone_pass() {
        let entry = CatalogEntry::new("p1", "Foo", "#missing", "read-only");
        let mut outcome = Outcome::new();
        outcome.note(Diagnostic::section_not_found(&entry));

        let result = EvaluationResult::assemble(outcome, 1, "1.0.0", Utc::now());
        assert!(result.passed);
        assert_eq!(result.status, Status::Passed);
        assert_eq!(result.summary.warnings_count, 1);
        assert_eq!(result.summary.findings_count, 0);
    }

    #[test]
    fn test_serialized_shape() {
        let result = EvaluationResult::assemble(Outcome::new(), 3, "2.0.0", Utc::now());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["status"], "passed");
        assert_eq!(json["passed"], true);
        assert_eq!(json["summary"]["total_prompts"], 3);
        assert_eq!(json["summary"]["patterns_config_version"], "2.0.0");
        assert!(json["findings"].as_array().unwrap().is_empty());
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(Status::from_passed(true).as_str(), "passed");
        assert_eq!(Status::from_passed(false).as_str(), "failed");
    }
}
