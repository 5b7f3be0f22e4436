//! Coverage command implementation
//!
//! Fails when the catalog and the anchored document sections drift apart,
//! or when coverage is below `--threshold`.

use crate::catalog::{Catalog, load_document};
use crate::checks::check_coverage;
use crate::cli::args::{ColorChoice, InputArgs};
use crate::cli::common::{exit_code, load_settings, open_streams, resolve_paths};
use crate::error::EvalError;
use crate::output::artifact::COVERAGE_RESULTS;
use crate::output::{HumanFormatter, write_json};
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Run the coverage gate and return its exit code
pub fn run_coverage(
    inputs: &InputArgs,
    threshold: Option<f64>,
    out: Option<&Path>,
    color: Option<ColorChoice>,
) -> i32 {
    exit_code(run_coverage_inner(inputs, threshold, out, color))
}

fn run_coverage_inner(
    inputs: &InputArgs,
    threshold: Option<f64>,
    out: Option<&Path>,
    color: Option<ColorChoice>,
) -> Result<bool, EvalError> {
    let settings = load_settings()?;
    let paths = resolve_paths(Path::new("."), &settings, inputs, None);

    let catalog = Catalog::load(&paths.catalog)?;
    let document = load_document(&paths.document)?;

    let result = check_coverage(&catalog, &document, Utc::now());

    let target = out.map_or_else(|| paths.output_dir.join(COVERAGE_RESULTS), PathBuf::from);
    let written = write_json(&target, &result)?;
    tracing::info!(
        path = %written.display(),
        coverage = result.summary.coverage_percentage,
        "wrote coverage result"
    );

    let (mut stdout, mut stderr) = open_streams(color, settings.output.color);
    HumanFormatter::new().write_coverage(&mut stdout, &mut stderr, &result, threshold)?;

    Ok(result.passed && result.meets_threshold(threshold))
}
