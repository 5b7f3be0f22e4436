#![forbid(unsafe_code)]

//! JSON result artifacts written for downstream automation

use crate::error::EvalError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Artifact file name of the adversarial evaluation
pub const ADVERSARIAL_RESULTS: &str = "adversarial-results.json";

/// Artifact file name of the coverage gate
pub const COVERAGE_RESULTS: &str = "coverage-results.json";

/// Artifact file name of the ROE compliance check
pub const ROE_RESULTS: &str = "roe-compliance-results.json";

/// Serialize `value` as pretty JSON to `path`, creating parent directories
///
/// # Errors
///
/// Returns `EvalError::Write` if the directory or file cannot be written.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<PathBuf, EvalError> {
    let write_err = |source| EvalError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let json = serde_json::to_string_pretty(value)
        .map_err(|e| write_err(std::io::Error::other(e)))?;
    fs::write(path, json).map_err(write_err)?;

    Ok(path.to_path_buf())
}
