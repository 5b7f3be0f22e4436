#![forbid(unsafe_code)]

//! Per-entry evaluation of prompt sections against pattern groups
//!
//! Each entry is evaluated independently against read-only configuration,
//! so entries are processed on the rayon pool. Results are collected in
//! catalog order, which keeps the report identical to a sequential pass.

use crate::catalog::CatalogEntry;
use crate::config::{CanonicalConfig, ClassRule};
use crate::engine::outcome::{Diagnostic, DiagnosticIssue, Finding, MatchIssue, Outcome};
use crate::engine::section::locate_section;
use crate::rules::{CompiledPattern, PatternRegistry, resolve_class_rule};
use crate::types::{INFORMATIONAL_GROUP, PROHIBITED_GROUP};
use rayon::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

/// Evaluates catalog entries against a compiled configuration
pub struct Evaluator<'a> {
    config: &'a CanonicalConfig,
    registry: &'a PatternRegistry,
}

impl<'a> Evaluator<'a> {
    pub fn new(config: &'a CanonicalConfig, registry: &'a PatternRegistry) -> Self {
        Self { config, registry }
    }

    /// Evaluate all entries, returning their outcomes in catalog order
    pub fn evaluate(&self, entries: &[CatalogEntry], document: &str) -> Outcome {
        let per_entry: Vec<Outcome> = entries
            .par_iter()
            .map(|entry| self.evaluate_entry(entry, document))
            .collect();

        let mut outcome = Outcome::new();
        for entry_outcome in per_entry {
            outcome.append(entry_outcome);
        }

        let missed = outcome
            .warnings()
            .iter()
            .filter(|w| w.is_diagnostic(DiagnosticIssue::SectionNotFound))
            .count();
        debug!(
            prompts = entries.len(),
            missed,
            findings = outcome.findings().len(),
            warnings = outcome.warnings().len(),
            "adversarial evaluation finished"
        );

        outcome
    }

    /// Evaluate a single entry
    ///
    /// Entries whose section cannot be located or whose safety class has no
    /// rule produce a diagnostic and no pattern matches.
    pub fn evaluate_entry(&self, entry: &CatalogEntry, document: &str) -> Outcome {
        let mut outcome = Outcome::new();

        let Some(section) = locate_section(document, &entry.anchor()) else {
            debug!(id = %entry.id, anchor = %entry.anchor, "section not found");
            outcome.note(Diagnostic::section_not_found(entry));
            return outcome;
        };

        let rule = match resolve_class_rule(self.config, &entry.safety_class) {
            Ok(rule) => rule,
            Err(err) => {
                debug!(id = %entry.id, safety_class = %entry.safety_class, "unknown safety class");
                outcome.note(Diagnostic::unknown_safety_class(entry, &err));
                return outcome;
            }
        };

        if rule.checks(PROHIBITED_GROUP) {
            self.scan_prohibited(entry, rule, section.text, &mut outcome);
        }

        if rule.checks(INFORMATIONAL_GROUP) {
            for pattern in self.registry.group(INFORMATIONAL_GROUP) {
                self.record_matches(
                    entry,
                    MatchIssue::InformationalPattern,
                    pattern,
                    section.text,
                    rule.fail_on_informational,
                    &mut outcome,
                );
            }
        }

        outcome
    }

    fn scan_prohibited(
        &self,
        entry: &CatalogEntry,
        rule: &ClassRule,
        text: &str,
        outcome: &mut Outcome,
    ) {
        let threshold = self.config.threshold_for(&entry.safety_class);
        let allowlist = self.config.allowlist_for(&entry.id);

        for pattern in self.registry.group(PROHIBITED_GROUP) {
            if is_allowlisted(pattern, allowlist) {
                continue;
            }
            let should_fail = rule.fail_on_prohibited && threshold.blocks(pattern.severity());
            self.record_matches(
                entry,
                MatchIssue::ProhibitedPattern,
                pattern,
                text,
                should_fail,
                outcome,
            );
        }
    }

    fn record_matches(
        &self,
        entry: &CatalogEntry,
        issue: MatchIssue,
        pattern: &CompiledPattern,
        text: &str,
        should_fail: bool,
        outcome: &mut Outcome,
    ) {
        for matched in pattern.find_matches(text) {
            outcome.record(Finding::new(entry, issue, pattern, matched, should_fail));
        }
    }
}

fn is_allowlisted(pattern: &CompiledPattern, allowlist: Option<&BTreeSet<String>>) -> bool {
    allowlist.is_some_and(|tokens| tokens.iter().any(|t| pattern.definition().is_named_by(t)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PatternConfigSource;
    use crate::engine::outcome::Warning;

    const DOC: &str = "\
## Foo {#foo}
run calc.exe now, then CALC.EXE again

## Lab {#lab}
calc.exe in the lab, nmap scan

## Info {#info}
an nmap scan
";

    fn config(json: &str) -> CanonicalConfig {
        PatternConfigSource::parse(json).unwrap().normalize()
    }

    fn run(config: &CanonicalConfig, entries: &[CatalogEntry]) -> Outcome {
        let registry = PatternRegistry::compile(config).unwrap();
        Evaluator::new(config, &registry).evaluate(entries, DOC)
    }

    const CURRENT: &str = r#"{
        "patterns": {
            "prohibited_for_non_lab": [
                { "pattern": "calc\\.exe", "description": "exec", "severity": "high" },
                { "pattern": "then", "description": "filler", "severity": "low" }
            ],
            "informational": [ { "pattern": "nmap", "description": "scanner" } ]
        },
        "safety_class_rules": {
            "read-only": { "check_patterns": ["prohibited_for_non_lab", "informational"], "fail_on_prohibited": true },
            "lab-only": { "check_patterns": ["informational"] },
            "strict": { "check_patterns": ["informational"], "fail_on_informational": true }
        },
        "severity_thresholds": { "read-only": "medium" }
    }"#;

    #[test]
    fn test_threshold_gates_by_rank() {
        let config = config(CURRENT);
        let entries = [CatalogEntry::new("p1", "Foo", "#foo", "read-only")];
        let outcome = run(&config, &entries);

        // Both calc.exe matches are high >= medium
        assert_eq!(outcome.findings().len(), 2);
        assert_eq!(outcome.findings()[0].matched_text, "calc.exe");
        assert_eq!(outcome.findings()[1].matched_text, "CALC.EXE");

        // "then" is low < medium
        assert_eq!(outcome.warnings().len(), 1);
        assert!(matches!(&outcome.warnings()[0], Warning::Match(f) if f.matched_text == "then"));
    }

    #[test]
    fn test_lab_only_skips_prohibited_group() {
        let config = config(CURRENT);
        let entries = [CatalogEntry::new("p2", "Lab", "#lab", "lab-only")];
        let outcome = run(&config, &entries);

        assert!(outcome.findings().is_empty());
        assert_eq!(outcome.warnings().len(), 1);
        assert_eq!(outcome.warnings()[0].issue(), "informational_pattern");
    }

    #[test]
    fn test_informational_blocks_when_configured() {
        let config = config(CURRENT);
        let entries = [CatalogEntry::new("p3", "Info", "#info", "strict")];
        let outcome = run(&config, &entries);

        assert_eq!(outcome.findings().len(), 1);
        assert_eq!(outcome.findings()[0].issue, MatchIssue::InformationalPattern);
        assert!(outcome.warnings().is_empty());
    }

    #[test]
    fn test_allowlist_drops_matches_entirely() {
        let mut config = config(CURRENT);
        config
            .per_prompt_allowlist
            .insert("p1".to_string(), ["exec".to_string(), "then".to_string()].into());
        let entries = [CatalogEntry::new("p1", "Foo", "#foo", "read-only")];
        let outcome = run(&config, &entries);

        assert!(outcome.findings().is_empty());
        assert!(outcome.warnings().is_empty());
    }

    #[test]
    fn test_allowlist_by_literal_pattern() {
        let mut config = config(CURRENT);
        config
            .per_prompt_allowlist
            .insert("p1".to_string(), ["calc\\.exe".to_string()].into());
        let entries = [CatalogEntry::new("p1", "Foo", "#foo", "read-only")];
        let outcome = run(&config, &entries);

        assert!(outcome.findings().is_empty());
        assert_eq!(outcome.warnings().len(), 1);
    }

    #[test]
    fn test_allowlist_does_not_apply_to_informational() {
        let mut config = config(CURRENT);
        config
            .per_prompt_allowlist
            .insert("p2".to_string(), ["scanner".to_string()].into());
        let entries = [CatalogEntry::new("p2", "Lab", "#lab", "lab-only")];
        let outcome = run(&config, &entries);

        assert_eq!(outcome.warnings().len(), 1);
    }

    #[test]
    fn test_threshold_off_disables_blocking() {
        let mut config = config(CURRENT);
        config
            .severity_thresholds
            .insert("read-only".to_string(), crate::types::SeverityThreshold::Off);
        let entries = [CatalogEntry::new("p1", "Foo", "#foo", "read-only")];
        let outcome = run(&config, &entries);

        assert!(outcome.findings().is_empty());
        assert_eq!(outcome.warnings().len(), 3);
    }

    #[test]
    fn test_default_threshold_is_high() {
        let mut config = config(CURRENT);
        config.severity_thresholds.clear();
        let entries = [CatalogEntry::new("p1", "Foo", "#foo", "read-only")];
        let outcome = run(&config, &entries);

        assert_eq!(outcome.findings().len(), 2);
        assert_eq!(outcome.warnings().len(), 1);
    }

    #[test]
    fn test_missing_section_skips_class_lookup() {
        let config = config(CURRENT);
        let entries = [CatalogEntry::new("p9", "Gone", "#missing", "unknown-tier")];
        let outcome = run(&config, &entries);

        assert_eq!(outcome.warnings().len(), 1);
        assert!(outcome.warnings()[0].is_diagnostic(DiagnosticIssue::SectionNotFound));
    }

    #[test]
    fn test_unknown_class_is_diagnostic() {
        let config = config(CURRENT);
        let entries = [CatalogEntry::new("p4", "Foo", "#foo", "unknown-tier")];
        let outcome = run(&config, &entries);

        assert!(outcome.findings().is_empty());
        assert_eq!(outcome.warnings().len(), 1);
        assert!(outcome.warnings()[0].is_diagnostic(DiagnosticIssue::UnknownSafetyClass));
    }

    #[test]
    fn test_output_follows_catalog_order() {
        let config = config(CURRENT);
        let entries = [
            CatalogEntry::new("a", "Missing", "#nope", "read-only"),
            CatalogEntry::new("b", "Lab", "#lab", "lab-only"),
            CatalogEntry::new("c", "Info", "#info", "lab-only"),
            CatalogEntry::new("d", "Foo", "#foo", "read-only"),
        ];
        let outcome = run(&config, &entries);
        let ids: Vec<&str> = outcome.warnings().iter().map(|w| w.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }
}
