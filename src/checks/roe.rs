#![forbid(unsafe_code)]

//! Rules-of-engagement (ROE) compliance for catalog metadata
//!
//! Lab-only prompts must declare `requires_roe_token: true`; a missing token
//! is the only blocking issue. Risk and authorization levels below the
//! class minimum, or absent where expected, are reported as warnings.

use crate::catalog::{Catalog, CatalogEntry};
use crate::engine::Status;
use crate::types::{ADVISORY, LAB_ONLY, READ_ONLY};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Risk levels in ascending order
pub const RISK_LEVELS: [&str; 4] = ["low", "medium", "high", "critical"];

/// Authorization levels in ascending order
pub const AUTHORIZATION_LEVELS: [&str; 4] = ["none", "supervisor", "security_team", "executive"];

/// ROE requirements for one safety class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoeRequirement {
    pub requires_roe_token: bool,
    pub min_risk_level: &'static str,
    pub min_authorization: &'static str,
}

/// Requirements for every known safety class
pub fn roe_requirements() -> BTreeMap<&'static str, RoeRequirement> {
    BTreeMap::from([
        (
            LAB_ONLY,
            RoeRequirement {
                requires_roe_token: true,
                min_risk_level: "medium",
                min_authorization: "security_team",
            },
        ),
        (
            ADVISORY,
            RoeRequirement {
                requires_roe_token: false,
                min_risk_level: "low",
                min_authorization: "supervisor",
            },
        ),
        (
            READ_ONLY,
            RoeRequirement {
                requires_roe_token: false,
                min_risk_level: "low",
                min_authorization: "none",
            },
        ),
    ])
}

/// Empty strings count as absent
fn present(level: Option<&str>) -> Option<&str> {
    level.filter(|l| !l.is_empty())
}

/// Position of `level` in `order`; unknown levels rank below all known ones
fn rank(order: &[&str], level: &str) -> Option<usize> {
    order.iter().position(|l| *l == level)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoeIssueKind {
    UnknownSafetyClass,
    MissingRoeToken,
    InsufficientRiskLevel,
    MissingRiskLevel,
    InsufficientAuthorization,
    MissingAuthorizationLevel,
}

/// A blocking issue or warning raised for one entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoeIssue {
    #[serde(rename = "type")]
    pub kind: RoeIssueKind,
    pub id: String,
    pub title: String,
    pub safety_class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_risk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_risk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_auth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_auth: Option<String>,
    pub message: String,
}

impl RoeIssue {
    fn new(kind: RoeIssueKind, entry: &CatalogEntry, message: String) -> Self {
        Self {
            kind,
            id: entry.id.clone(),
            title: entry.title.clone(),
            safety_class: entry.safety_class.clone(),
            current_risk: None,
            minimum_risk: None,
            current_auth: None,
            minimum_auth: None,
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoeSummary {
    pub total_prompts: usize,
    pub lab_only_prompts: usize,
    pub roe_compliant: usize,
    pub compliance_issues: usize,
    pub warnings: usize,
}

/// The ROE compliance artifact
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoeResult {
    pub status: Status,
    pub timestamp: DateTime<Utc>,
    pub summary: RoeSummary,
    pub compliance_rules: BTreeMap<&'static str, RoeRequirement>,
    pub issues: Vec<RoeIssue>,
    pub warnings: Vec<RoeIssue>,
    pub passed: bool,
}

/// Check every catalog entry against the ROE requirements of its class
pub fn check_roe(catalog: &Catalog, timestamp: DateTime<Utc>) -> RoeResult {
    let rules = roe_requirements();
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    for entry in catalog.iter() {
        let class = entry.safety_class.as_str();
        let Some(rule) = rules.get(class) else {
            warnings.push(RoeIssue::new(
                RoeIssueKind::UnknownSafetyClass,
                entry,
                format!("Unknown safety class: {}", class),
            ));
            continue;
        };

        if rule.requires_roe_token && entry.requires_roe_token != Some(true) {
            issues.push(RoeIssue::new(
                RoeIssueKind::MissingRoeToken,
                entry,
                format!("{} prompts must set requires_roe_token: true", class),
            ));
        }

        match present(entry.risk_level.as_deref()) {
            Some(risk) => {
                if rank(&RISK_LEVELS, risk) < rank(&RISK_LEVELS, rule.min_risk_level) {
                    let mut issue = RoeIssue::new(
                        RoeIssueKind::InsufficientRiskLevel,
                        entry,
                        format!(
                            "Risk level \"{}\" may be too low for {} (minimum: {})",
                            risk, class, rule.min_risk_level
                        ),
                    );
                    issue.current_risk = Some(risk.to_string());
                    issue.minimum_risk = Some(rule.min_risk_level.to_string());
                    warnings.push(issue);
                }
            }
            None if class == LAB_ONLY => warnings.push(RoeIssue::new(
                RoeIssueKind::MissingRiskLevel,
                entry,
                format!("{} prompts should specify risk_level", class),
            )),
            None => {}
        }

        match present(entry.authorization_level.as_deref()) {
            Some(auth) => {
                if rank(&AUTHORIZATION_LEVELS, auth)
                    < rank(&AUTHORIZATION_LEVELS, rule.min_authorization)
                {
                    let mut issue = RoeIssue::new(
                        RoeIssueKind::InsufficientAuthorization,
                        entry,
                        format!(
                            "Authorization level \"{}\" may be too low for {} (minimum: {})",
                            auth, class, rule.min_authorization
                        ),
                    );
                    issue.current_auth = Some(auth.to_string());
                    issue.minimum_auth = Some(rule.min_authorization.to_string());
                    warnings.push(issue);
                }
            }
            None if class != READ_ONLY => warnings.push(RoeIssue::new(
                RoeIssueKind::MissingAuthorizationLevel,
                entry,
                format!("{} prompts should specify authorization_level", class),
            )),
            None => {}
        }
    }

    let passed = issues.is_empty();
    RoeResult {
        status: Status::from_passed(passed),
        timestamp,
        summary: RoeSummary {
            total_prompts: catalog.len(),
            lab_only_prompts: catalog.iter().filter(|e| e.safety_class == LAB_ONLY).count(),
            roe_compliant: catalog
                .iter()
                .filter(|e| e.requires_roe_token == Some(true))
                .count(),
            compliance_issues: issues.len(),
            warnings: warnings.len(),
        },
        compliance_rules: rules,
        issues,
        warnings,
        passed,
    }
}
