//! Error types for guardrail-evals
//!
//! Errors are split by where they occur: loading inputs (`ConfigError`),
//! compiling pattern rules (`RuleError`), and the top-level `EvalError`
//! that wraps both. Rule violations found in prompt sections are never
//! errors; they are reported as findings and warnings.

use std::path::PathBuf;

/// Errors raised while loading or validating run inputs
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Input file could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON in the catalog or pattern configuration
    #[error("Invalid JSON in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Malformed guardrail-evals.toml
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Semantically invalid configuration value
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Returns true if the error came from malformed input text rather than
    /// a missing or unreadable file
    pub fn is_parse_error(&self) -> bool {
        matches!(self, ConfigError::Json { .. } | ConfigError::Toml(_))
    }
}

/// Errors raised while compiling pattern rules
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// A pattern definition is not a well-formed regular expression
    #[error("Invalid pattern '{pattern}' in group '{group}': {message}")]
    InvalidPattern {
        group: String,
        pattern: String,
        message: String,
    },
}

/// Top-level error type for guardrail-evals
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rule error
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// Report could not be written
    #[error("Failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Terminal output failed
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl EvalError {
    /// Returns true for errors caused by malformed input content
    pub fn is_parse_error(&self) -> bool {
        match self {
            EvalError::Config(e) => e.is_parse_error(),
            EvalError::Rule(_) => true,
            EvalError::Write { .. } | EvalError::Output(_) => false,
        }
    }
}
