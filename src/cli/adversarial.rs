//! Adversarial command implementation
//!
//! This module implements `guardrail-evals adversarial`, which:
//! - Loads the catalog, prompt document and pattern configuration
//! - Compiles every pattern before any entry is evaluated
//! - Evaluates each cataloged section against its safety-class rule
//! - Writes `adversarial-results.json` and prints a human summary
//! - Returns exit code 1 when any blocking finding exists

use crate::catalog::{Catalog, load_document};
use crate::cli::args::{ColorChoice, InputArgs};
use crate::cli::common::{exit_code, load_settings, open_streams, resolve_paths};
use crate::config::PatternConfigSource;
use crate::error::EvalError;
use crate::output::artifact::ADVERSARIAL_RESULTS;
use crate::output::{HumanFormatter, write_json};
use std::path::Path;

/// Run the adversarial evaluation
///
/// # Returns
///
/// Exit code:
/// - 0: no blocking findings
/// - 1: one or more blocking findings
/// - 2: configuration/I/O error
/// - 3: parse error (invalid JSON or invalid pattern)
pub fn run_adversarial(
    inputs: &InputArgs,
    patterns: Option<&Path>,
    color: Option<ColorChoice>,
) -> i32 {
    exit_code(run_adversarial_inner(inputs, patterns, color))
}

fn run_adversarial_inner(
    inputs: &InputArgs,
    patterns: Option<&Path>,
    color: Option<ColorChoice>,
) -> Result<bool, EvalError> {
    let settings = load_settings()?;
    let paths = resolve_paths(Path::new("."), &settings, inputs, patterns);

    let catalog = Catalog::load(&paths.catalog)?;
    let document = load_document(&paths.document)?;
    let config = PatternConfigSource::load(&paths.patterns)?.normalize();

    // Aborts on the first invalid pattern, before anything is written
    let result = crate::engine::evaluate(&catalog, &document, &config)?;

    let written = write_json(&paths.output_dir.join(ADVERSARIAL_RESULTS), &result)?;
    tracing::info!(path = %written.display(), status = result.status.as_str(), "wrote evaluation result");

    let (mut out, mut err) = open_streams(color, settings.output.color);
    HumanFormatter::new().write_evaluation(&mut out, &mut err, &result)?;

    Ok(result.passed)
}
