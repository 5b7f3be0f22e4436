#![forbid(unsafe_code)]

//! Registry of compiled pattern groups
//!
//! Every group in the canonical configuration is compiled up front, so a
//! malformed pattern aborts the run before any entry is evaluated, even if
//! no safety class consults its group.

use crate::config::CanonicalConfig;
use crate::error::RuleError;
use crate::rules::CompiledPattern;
use std::collections::BTreeMap;

/// Compiled patterns keyed by group name
#[derive(Debug, Default)]
pub struct PatternRegistry {
    groups: BTreeMap<String, Vec<CompiledPattern>>,
}

impl PatternRegistry {
    /// Compile all pattern groups of a configuration
    ///
    /// # Errors
    ///
    /// Returns the first `RuleError::InvalidPattern` encountered.
    pub fn compile(config: &CanonicalConfig) -> Result<Self, RuleError> {
        let mut groups = BTreeMap::new();

        for (name, definitions) in &config.patterns {
            let compiled = definitions
                .iter()
                .cloned()
                .map(|definition| CompiledPattern::compile(name, definition))
                .collect::<Result<Vec<_>, _>>()?;
            groups.insert(name.clone(), compiled);
        }

        Ok(Self { groups })
    }

    /// Compiled patterns of a group, in definition order
    pub fn group(&self, name: &str) -> &[CompiledPattern] {
        self.groups.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names of all compiled groups
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Total number of compiled patterns across all groups
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
