#![forbid(unsafe_code)]

//! Safety-class rule resolution

use crate::config::{CanonicalConfig, ClassRule};

/// No rule is registered for an entry's safety class
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown safety class: {safety_class}")]
pub struct UnknownSafetyClass {
    pub safety_class: String,
}

/// Look up the rule for `safety_class`
///
/// An unknown class is returned as an error value for the caller to record;
/// it never aborts evaluation of other entries.
pub fn resolve_class_rule<'c>(
    config: &'c CanonicalConfig,
    safety_class: &str,
) -> Result<&'c ClassRule, UnknownSafetyClass> {
    config
        .safety_class_rules
        .get(safety_class)
        .ok_or_else(|| UnknownSafetyClass {
            safety_class: safety_class.to_string(),
        })
}
