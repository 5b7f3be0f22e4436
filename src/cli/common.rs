//! Common helper functions shared across CLI commands
//!
//! Resolves input locations from flags and guardrail-evals.toml, picks the
//! terminal color mode and maps errors to exit codes.

use crate::cli::args::{ColorChoice, InputArgs};
use crate::config::{ColorOption, Settings};
use crate::error::EvalError;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use termcolor::StandardStream;

/// Exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;
pub const EXIT_PARSE_ERROR: i32 = 3;

const DEFAULT_DOCUMENT: &str = "Tem-Prompts.md";
const DEFAULT_CATALOG: &str = "index.json";
const DEFAULT_PATTERNS: &str = "guardrails/patterns.json";
const DEFAULT_OUTPUT_DIR: &str = "eval-results";

/// Fully resolved input and output locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub document: PathBuf,
    pub catalog: PathBuf,
    pub patterns: PathBuf,
    pub output_dir: PathBuf,
}

/// Load guardrail-evals.toml from the working directory, if present
pub(crate) fn load_settings() -> Result<Settings, EvalError> {
    Ok(Settings::discover(".")?)
}

/// Lowercase `prompts` wins when both spellings exist
fn default_prompts_dir(base: &Path) -> PathBuf {
    let lower = base.join("prompts");
    if lower.is_dir() {
        lower
    } else {
        base.join("Prompts")
    }
}

/// Resolve locations with precedence flag, then settings, then default
///
/// Document and catalog are joined onto the prompts directory; absolute
/// values are kept as given.
pub fn resolve_paths(
    base: &Path,
    settings: &Settings,
    inputs: &InputArgs,
    patterns: Option<&Path>,
) -> ResolvedPaths {
    let paths = &settings.paths;

    let prompts_dir = inputs
        .prompts_dir
        .as_ref()
        .or(paths.prompts_dir.as_ref())
        .map(|dir| base.join(dir))
        .unwrap_or_else(|| default_prompts_dir(base));

    let document = inputs
        .document
        .as_ref()
        .or(paths.document.as_ref())
        .map_or_else(|| PathBuf::from(DEFAULT_DOCUMENT), Clone::clone);

    let catalog = inputs
        .catalog
        .as_ref()
        .or(paths.catalog.as_ref())
        .map_or_else(|| PathBuf::from(DEFAULT_CATALOG), Clone::clone);

    let patterns = patterns
        .map(Path::to_path_buf)
        .or_else(|| paths.patterns.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PATTERNS));

    let output_dir = inputs
        .output_dir
        .as_ref()
        .or(paths.output_dir.as_ref())
        .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), Clone::clone);

    ResolvedPaths {
        document: prompts_dir.join(document),
        catalog: prompts_dir.join(catalog),
        patterns: base.join(patterns),
        output_dir: base.join(output_dir),
    }
}

/// Pick the termcolor mode for one stream
pub fn color_choice(
    flag: Option<ColorChoice>,
    setting: ColorOption,
    is_terminal: bool,
) -> termcolor::ColorChoice {
    let requested = flag.unwrap_or(match setting {
        ColorOption::Auto => ColorChoice::Auto,
        ColorOption::Always => ColorChoice::Always,
        ColorOption::Never => ColorChoice::Never,
    });

    match requested {
        ColorChoice::Always => termcolor::ColorChoice::Always,
        ColorChoice::Never => termcolor::ColorChoice::Never,
        ColorChoice::Auto if is_terminal => termcolor::ColorChoice::Auto,
        ColorChoice::Auto => termcolor::ColorChoice::Never,
    }
}

/// Open stdout and stderr with the resolved color mode
pub(crate) fn open_streams(
    flag: Option<ColorChoice>,
    setting: ColorOption,
) -> (StandardStream, StandardStream) {
    let out = color_choice(flag, setting, std::io::stdout().is_terminal());
    let err = color_choice(flag, setting, std::io::stderr().is_terminal());
    (StandardStream::stdout(out), StandardStream::stderr(err))
}

/// Map a gate outcome to a process exit code, reporting errors on stderr
pub(crate) fn exit_code(result: Result<bool, EvalError>) -> i32 {
    match result {
        Ok(true) => EXIT_SUCCESS,
        Ok(false) => EXIT_FAILED,
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_parse_error() {
                EXIT_PARSE_ERROR
            } else {
                EXIT_ERROR
            }
        }
    }
}
