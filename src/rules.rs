#![forbid(unsafe_code)]

//! Pattern compilation, registry, and safety-class rule resolution

mod pattern;
mod registry;
mod resolver;

pub use pattern::{CompiledPattern, PatternMatch};
pub use registry::PatternRegistry;
pub use resolver::{UnknownSafetyClass, resolve_class_rule};
