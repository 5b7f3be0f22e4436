//! Section location, per-entry evaluation, and report assembly

pub mod evaluator;
pub mod outcome;
pub mod report;
pub mod section;

pub use evaluator::Evaluator;
pub use outcome::{Diagnostic, DiagnosticIssue, Finding, MatchIssue, Outcome, Warning};
pub use report::{EvaluationResult, Status, Summary};
pub use section::{AnchoredSection, Section, SectionKind, locate_section, scan_anchored_sections};

use crate::catalog::Catalog;
use crate::config::CanonicalConfig;
use crate::error::RuleError;
use crate::rules::PatternRegistry;
use chrono::Utc;

/// Compile the configuration and evaluate every catalog entry
///
/// # Errors
///
/// Returns `RuleError::InvalidPattern` before any entry is evaluated if a
/// pattern fails to compile.
pub fn evaluate(
    catalog: &Catalog,
    document: &str,
    config: &CanonicalConfig,
) -> Result<EvaluationResult, RuleError> {
    let registry = PatternRegistry::compile(config)?;
    let outcome = Evaluator::new(config, &registry).evaluate(&catalog.entries, document);
    Ok(EvaluationResult::assemble(
        outcome,
        catalog.len(),
        config.version.clone(),
        Utc::now(),
    ))
}
