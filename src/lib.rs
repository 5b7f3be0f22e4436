#![forbid(unsafe_code)]

//! guardrail-evals: compliance gates for cataloged prompt sections
//!
//! Every cataloged prompt entry is bound to a safety class. The adversarial
//! gate locates each entry's section in the prompt document and scans it
//! with the pattern groups its class requires; blocking matches fail the
//! run. Coverage and ROE gates check the catalog itself.

pub mod catalog;
pub mod checks;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod rules;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, EvalError, RuleError};

// Re-export core domain types for convenient access
pub use catalog::{Catalog, CatalogEntry};
pub use config::{CanonicalConfig, PatternConfigSource};
pub use engine::{EvaluationResult, evaluate};
pub use types::{Anchor, Severity, SeverityThreshold};
