//! ROE compliance command implementation

use crate::catalog::Catalog;
use crate::checks::check_roe;
use crate::cli::args::{ColorChoice, InputArgs};
use crate::cli::common::{exit_code, load_settings, open_streams, resolve_paths};
use crate::error::EvalError;
use crate::output::artifact::ROE_RESULTS;
use crate::output::{HumanFormatter, write_json};
use chrono::Utc;
use std::path::Path;

/// Run the ROE compliance check and return its exit code
pub fn run_roe(inputs: &InputArgs, color: Option<ColorChoice>) -> i32 {
    exit_code(run_roe_inner(inputs, color))
}

fn run_roe_inner(inputs: &InputArgs, color: Option<ColorChoice>) -> Result<bool, EvalError> {
    let settings = load_settings()?;
    let paths = resolve_paths(Path::new("."), &settings, inputs, None);

    let catalog = Catalog::load(&paths.catalog)?;
    let result = check_roe(&catalog, Utc::now());

    let written = write_json(&paths.output_dir.join(ROE_RESULTS), &result)?;
    tracing::info!(path = %written.display(), issues = result.issues.len(), "wrote ROE result");

    let (mut out, mut err) = open_streams(color, settings.output.color);
    HumanFormatter::new().write_roe(&mut out, &mut err, &result)?;

    Ok(result.passed)
}
