#![forbid(unsafe_code)]

//! Coverage gate: catalog anchors versus anchored document sections
//!
//! Only sections with an explicit `{#token}` marker count as prompt
//! sections, so meta headings such as "Sources Ledger" never show up as
//! missing.

use crate::catalog::{Catalog, CatalogEntry};
use crate::engine::{AnchoredSection, Status, scan_anchored_sections};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

/// A document section whose anchor has no catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingSection {
    pub title: String,
    pub anchor: String,
}

impl From<&AnchoredSection> for MissingSection {
    fn from(section: &AnchoredSection) -> Self {
        Self {
            title: section.title.clone(),
            anchor: section.anchor.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageSummary {
    pub markdown_prompt_sections: usize,
    pub catalog_entries: usize,
    pub missing_entries: usize,
    pub extra_entries: usize,
    pub coverage_percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageIssues {
    pub missing_in_index: Vec<MissingSection>,
    pub extra_in_index: Vec<CatalogEntry>,
}

/// The coverage gate artifact
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageResult {
    pub status: Status,
    pub timestamp: DateTime<Utc>,
    pub summary: CoverageSummary,
    pub issues: CoverageIssues,
    pub passed: bool,
}

impl CoverageResult {
    /// Returns true if coverage reaches `threshold` percent (or no threshold)
    pub fn meets_threshold(&self, threshold: Option<f64>) -> bool {
        threshold.is_none_or(|min| f64::from(self.summary.coverage_percentage) >= min)
    }
}

fn normalized_anchor(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Compare catalog anchors with the anchored sections of `document`
pub fn check_coverage(catalog: &Catalog, document: &str, timestamp: DateTime<Utc>) -> CoverageResult {
    let sections = scan_anchored_sections(document);

    let indexed: BTreeSet<String> = catalog
        .iter()
        .map(|e| normalized_anchor(&e.anchor))
        .filter(|a| !a.is_empty())
        .collect();

    let mut seen = BTreeSet::new();
    let missing_in_index: Vec<MissingSection> = sections
        .iter()
        .filter(|s| seen.insert(s.anchor.to_string()))
        .filter(|s| !indexed.contains(&s.anchor.to_string()))
        .map(MissingSection::from)
        .collect();

    let document_anchors: BTreeSet<String> = sections.iter().map(|s| s.anchor.to_string()).collect();
    let extra_in_index: Vec<CatalogEntry> = catalog
        .iter()
        .filter(|e| {
            let anchor = normalized_anchor(&e.anchor);
            !anchor.is_empty() && !document_anchors.contains(&anchor)
        })
        .cloned()
        .collect();

    let coverage_percentage = if sections.is_empty() {
        100
    } else {
        let covered = sections.len().saturating_sub(missing_in_index.len());
        ((covered as f64 / sections.len() as f64) * 100.0).round() as u32
    };

    let passed = missing_in_index.is_empty() && extra_in_index.is_empty();

    CoverageResult {
        status: Status::from_passed(passed),
        timestamp,
        summary: CoverageSummary {
            markdown_prompt_sections: sections.len(),
            catalog_entries: catalog.len(),
            missing_entries: missing_in_index.len(),
            extra_entries: extra_in_index.len(),
            coverage_percentage,
        },
        issues: CoverageIssues {
            missing_in_index,
            extra_in_index,
        },
        passed,
    }
}
