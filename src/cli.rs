//! CLI argument parsing and command dispatch

pub mod adversarial;
pub mod args;
pub mod common;
pub mod coverage;
pub mod roe;

// Re-export types for convenient access
pub use args::{Cli, ColorChoice, Command, InputArgs};
