//! Catalog-level gates that run alongside the adversarial evaluation

pub mod coverage;
pub mod roe;

pub use coverage::{CoverageResult, check_coverage};
pub use roe::{RoeResult, check_roe};
