#![forbid(unsafe_code)]

//! Findings, diagnostics, and the per-entry outcome that routes them
//!
//! [`Outcome`] is the only place findings are stored. Blocking findings can
//! only land in `findings` and everything else only in `warnings`, because
//! [`Outcome::record`] routes on `should_fail` and the sequences are not
//! publicly mutable.

use crate::catalog::CatalogEntry;
use crate::rules::{CompiledPattern, PatternMatch, UnknownSafetyClass};
use serde::Serialize;

/// Which pattern group produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchIssue {
    ProhibitedPattern,
    InformationalPattern,
}

/// One pattern match inside one entry's section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub id: String,
    pub title: String,
    pub issue: MatchIssue,
    pub pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub matched_text: String,
    pub safety_class: String,
    pub should_fail: bool,
}

impl Finding {
    pub fn new(
        entry: &CatalogEntry,
        issue: MatchIssue,
        pattern: &CompiledPattern,
        matched: PatternMatch<'_>,
        should_fail: bool,
    ) -> Self {
        let definition = pattern.definition();
        Self {
            id: entry.id.clone(),
            title: entry.title.clone(),
            issue,
            pattern: definition.pattern.clone(),
            description: definition.description.clone(),
            severity: definition.severity.clone(),
            category: definition.category.clone(),
            matched_text: matched.text.to_string(),
            safety_class: entry.safety_class.clone(),
            should_fail,
        }
    }
}

/// Structural problems that prevent an entry from being scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticIssue {
    SectionNotFound,
    UnknownSafetyClass,
}

/// A non-blocking note that an entry was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub id: String,
    pub title: String,
    pub issue: DiagnosticIssue,
    pub message: String,
}

impl Diagnostic {
    pub fn section_not_found(entry: &CatalogEntry) -> Self {
        Self {
            id: entry.id.clone(),
            title: entry.title.clone(),
            issue: DiagnosticIssue::SectionNotFound,
            message: format!("Could not find section for anchor {}", entry.anchor),
        }
    }

    pub fn unknown_safety_class(entry: &CatalogEntry, err: &UnknownSafetyClass) -> Self {
        Self {
            id: entry.id.clone(),
            title: entry.title.clone(),
            issue: DiagnosticIssue::UnknownSafetyClass,
            message: err.to_string(),
        }
    }
}

/// An entry of the `warnings` sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Warning {
    Match(Finding),
    Diagnostic(Diagnostic),
}

impl Warning {
    pub fn id(&self) -> &str {
        match self {
            Warning::Match(f) => &f.id,
            Warning::Diagnostic(d) => &d.id,
        }
    }

    /// Issue name as written in the report
    pub fn issue(&self) -> &'static str {
        match self {
            Warning::Match(f) => match f.issue {
                MatchIssue::ProhibitedPattern => "prohibited_pattern",
                MatchIssue::InformationalPattern => "informational_pattern",
            },
            Warning::Diagnostic(d) => match d.issue {
                DiagnosticIssue::SectionNotFound => "section_not_found",
                DiagnosticIssue::UnknownSafetyClass => "unknown_safety_class",
            },
        }
    }

    /// Diagnostic message, or the pattern description for matches
    pub fn detail(&self) -> &str {
        match self {
            Warning::Match(f) => f.description.as_deref().unwrap_or(&f.pattern),
            Warning::Diagnostic(d) => &d.message,
        }
    }

    pub fn is_diagnostic(&self, issue: DiagnosticIssue) -> bool {
        matches!(self, Warning::Diagnostic(d) if d.issue == issue)
    }
}

/// Findings and warnings collected for one or more entries, in order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outcome {
    findings: Vec<Finding>,
    warnings: Vec<Warning>,
}

impl Outcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a finding by its `should_fail` flag
    pub fn record(&mut self, finding: Finding) {
        if finding.should_fail {
            self.findings.push(finding);
        } else {
            self.warnings.push(Warning::Match(finding));
        }
    }

    /// Record a diagnostic; diagnostics are always warnings
    pub fn note(&mut self, diagnostic: Diagnostic) {
        self.warnings.push(Warning::Diagnostic(diagnostic));
    }

    /// Append another outcome after this one
    pub fn append(&mut self, other: Outcome) {
        self.findings.extend(other.findings);
        self.warnings.extend(other.warnings);
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_parts(self) -> (Vec<Finding>, Vec<Warning>) {
        (self.findings, self.warnings)
    }
}
