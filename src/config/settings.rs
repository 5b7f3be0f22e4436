//! Parsing and validation for guardrail-evals.toml
//!
//! The settings file is optional. It only points the gates at their inputs
//! and output directory; command-line flags take precedence over it.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const SETTINGS_FILE: &str = "guardrail-evals.toml";

/// Main settings struct for guardrail-evals.toml
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Settings format version; only "1" is accepted when present
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse settings from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load `guardrail-evals.toml` from `dir` if it exists, defaults otherwise
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(SETTINGS_FILE);
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(version) = &self.version
            && version != "1"
        {
            return Err(ConfigError::InvalidValue {
                field: "version".to_string(),
                message: format!("unsupported settings version '{}', expected '1'", version),
            });
        }
        Ok(())
    }
}

/// Input and output locations
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory holding the prompt document and catalog
    #[serde(default)]
    pub prompts_dir: Option<PathBuf>,

    /// Prompt document, relative to `prompts_dir`
    #[serde(default)]
    pub document: Option<PathBuf>,

    /// Catalog JSON, relative to `prompts_dir`
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    /// Pattern configuration JSON
    #[serde(default)]
    pub patterns: Option<PathBuf>,

    /// Directory receiving the result artifacts
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

/// Output configuration section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorOption,
}

/// Color output options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}
