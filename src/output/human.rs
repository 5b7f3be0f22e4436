#![forbid(unsafe_code)]

//! Human-readable summaries for the terminal
//!
//! Summaries and warnings go to `out`; blocking problems go to `err` so CI
//! logs surface them next to the failing exit code.

use crate::checks::{CoverageResult, RoeResult};
use crate::engine::EvaluationResult;
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// Formatter for gate results
#[derive(Debug, Default)]
pub struct HumanFormatter;

fn heading(w: &mut dyn WriteColor, color: Color, text: &str) -> io::Result<()> {
    w.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    writeln!(w, "{}", text)?;
    w.reset()
}

fn verdict(w: &mut dyn WriteColor, passed: bool, text: &str) -> io::Result<()> {
    let color = if passed { Color::Green } else { Color::Red };
    w.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    writeln!(w, "{}", text)?;
    w.reset()
}

impl HumanFormatter {
    pub fn new() -> Self {
        HumanFormatter
    }

    /// Print the adversarial evaluation summary
    pub fn write_evaluation(
        &self,
        out: &mut dyn WriteColor,
        err: &mut dyn WriteColor,
        result: &EvaluationResult,
    ) -> io::Result<()> {
        writeln!(out)?;
        heading(out, Color::Cyan, "Adversarial Evaluation Summary:")?;
        writeln!(out, "- Total prompts evaluated: {}", result.summary.total_prompts)?;
        writeln!(out, "- Blocking findings: {}", result.summary.findings_count)?;
        writeln!(out, "- Warnings: {}", result.summary.warnings_count)?;

        if !result.warnings.is_empty() {
            writeln!(out)?;
            heading(out, Color::Yellow, "Warnings (non-blocking):")?;
            for warning in &result.warnings {
                writeln!(
                    out,
                    "  - {}: {} - {}",
                    warning.id(),
                    warning.issue(),
                    warning.detail()
                )?;
            }
        }

        if !result.passed {
            writeln!(err)?;
            heading(err, Color::Red, "Blocking findings detected:")?;
            for finding in &result.findings {
                writeln!(
                    err,
                    "  - {} ({}): {}",
                    finding.id,
                    finding.safety_class,
                    finding.description.as_deref().unwrap_or(&finding.pattern)
                )?;
                writeln!(err, "    Pattern: {}", finding.pattern)?;
                writeln!(err, "    Matched: \"{}\"", finding.matched_text)?;
            }
            writeln!(err)?;
            return verdict(
                err,
                false,
                &format!(
                    "❌ Adversarial evaluation failed - {} blocking findings",
                    result.findings.len()
                ),
            );
        }

        writeln!(out)?;
        verdict(
            out,
            true,
            "✅ Adversarial evaluations passed - no blocking issues found.",
        )
    }

    /// Print the coverage gate summary
    pub fn write_coverage(
        &self,
        out: &mut dyn WriteColor,
        err: &mut dyn WriteColor,
        result: &CoverageResult,
        threshold: Option<f64>,
    ) -> io::Result<()> {
        if !result.passed {
            verdict(err, false, "❌ Coverage gate failed.")?;
            if !result.issues.missing_in_index.is_empty() {
                writeln!(err, "\nPrompt sections missing in the catalog:")?;
                for section in &result.issues.missing_in_index {
                    writeln!(err, "  - {}  ({})", section.title, section.anchor)?;
                }
            }
            if !result.issues.extra_in_index.is_empty() {
                writeln!(err, "\nCatalog entries without matching prompt section:")?;
                for entry in &result.issues.extra_in_index {
                    writeln!(err, "  - {}  ({})", entry.title, entry.anchor)?;
                }
            }
            return Ok(());
        }

        if let Some(min) = threshold
            && !result.meets_threshold(threshold)
        {
            return verdict(
                err,
                false,
                &format!(
                    "❌ Coverage gate below threshold: required {}% | actual {}%",
                    min, result.summary.coverage_percentage
                ),
            );
        }

        verdict(
            out,
            true,
            "✅ Coverage gate passed: prompts catalog matches enumerated sections.",
        )
    }

    /// Print the ROE compliance summary
    pub fn write_roe(
        &self,
        out: &mut dyn WriteColor,
        err: &mut dyn WriteColor,
        result: &RoeResult,
    ) -> io::Result<()> {
        writeln!(out)?;
        heading(out, Color::Cyan, "ROE Token Compliance Check:")?;
        writeln!(out, "- Total prompts: {}", result.summary.total_prompts)?;
        writeln!(out, "- Lab-only prompts: {}", result.summary.lab_only_prompts)?;
        writeln!(out, "- ROE-compliant prompts: {}", result.summary.roe_compliant)?;
        writeln!(out, "- Compliance issues: {}", result.summary.compliance_issues)?;
        writeln!(out, "- Warnings: {}", result.summary.warnings)?;

        if !result.issues.is_empty() {
            writeln!(err)?;
            heading(err, Color::Red, "Compliance issues (blocking):")?;
            for issue in &result.issues {
                writeln!(err, "  - {}: {}", issue.id, issue.message)?;
            }
        }

        if !result.warnings.is_empty() {
            writeln!(out)?;
            heading(out, Color::Yellow, "Warnings (non-blocking):")?;
            for warning in &result.warnings {
                writeln!(out, "  - {}: {}", warning.id, warning.message)?;
            }
        }

        if !result.passed {
            writeln!(err)?;
            return verdict(
                err,
                false,
                &format!(
                    "❌ ROE compliance check failed - {} issues found",
                    result.issues.len()
                ),
            );
        }

        writeln!(out)?;
        verdict(out, true, "✅ ROE compliance check passed")
    }
}
