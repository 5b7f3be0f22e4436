//! Output formatters (human summaries and JSON artifacts)

pub mod artifact;
pub mod human;

pub use artifact::write_json;
pub use human::HumanFormatter;
