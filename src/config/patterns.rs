//! Pattern configuration schemas and normalization
//!
//! Pattern files come in two shapes. The current schema carries `patterns`
//! and `safety_class_rules` at the top level and is used as-is. The legacy
//! schema lists prohibited patterns per class under `classes` and is
//! converted into the current shape with hard-coded class rules. Everything
//! downstream only sees [`CanonicalConfig`].

use crate::error::ConfigError;
use crate::types::{
    ADVISORY, INFORMATIONAL_GROUP, LAB_ONLY, PROHIBITED_GROUP, READ_ONLY, SeverityThreshold,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Version reported when a pattern file does not declare one
pub const DEFAULT_CONFIG_VERSION: &str = "1.0.0";

/// A single content pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDefinition {
    /// Regular expression source
    pub pattern: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Severity label (`low`, `medium`, `high`); kept verbatim for reporting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl PatternDefinition {
    /// Returns true if `token` names this pattern by description or by its
    /// literal pattern text
    pub fn is_named_by(&self, token: &str) -> bool {
        self.pattern == token || self.description.as_deref() == Some(token)
    }
}

/// Which pattern groups a safety class checks and whether matches block
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassRule {
    #[serde(default)]
    pub check_patterns: BTreeSet<String>,

    #[serde(default)]
    pub fail_on_prohibited: bool,

    #[serde(default)]
    pub fail_on_informational: bool,
}

impl ClassRule {
    pub fn new(groups: &[&str], fail_on_prohibited: bool, fail_on_informational: bool) -> Self {
        Self {
            check_patterns: groups.iter().map(|g| g.to_string()).collect(),
            fail_on_prohibited,
            fail_on_informational,
        }
    }

    /// Returns true if this rule evaluates the named group
    pub fn checks(&self, group: &str) -> bool {
        self.check_patterns.contains(group)
    }
}

/// Settings honored in both schemas
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GateOverrides {
    /// Safety class to minimum blocking severity (or `"off"`)
    #[serde(default)]
    pub severity_thresholds: BTreeMap<String, SeverityThreshold>,

    /// Entry id to pattern descriptions or pattern strings exempted for it
    #[serde(default)]
    pub per_prompt_allowlist: BTreeMap<String, BTreeSet<String>>,
}

/// Pattern file in the current schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentSchema {
    #[serde(default)]
    pub version: Option<String>,

    pub patterns: BTreeMap<String, Vec<PatternDefinition>>,

    pub safety_class_rules: BTreeMap<String, ClassRule>,

    #[serde(flatten)]
    pub overrides: GateOverrides,
}

/// Pattern file in the legacy per-class schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacySchema {
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub classes: BTreeMap<String, LegacyClass>,

    #[serde(flatten)]
    pub overrides: GateOverrides,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LegacyClass {
    #[serde(default)]
    pub prohibited: Vec<LegacyPattern>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyPattern {
    #[serde(default)]
    pub id: Option<String>,
    pub pattern: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// A pattern file as read from disk, in whichever schema it uses
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PatternConfigSource {
    Current(CurrentSchema),
    Legacy(LegacySchema),
}

impl PatternConfigSource {
    /// Selects the schema from the top-level keys and deserializes it
    ///
    /// Both `patterns` and `safety_class_rules` present selects the current
    /// schema; anything else is read as legacy.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let is_current = value
            .as_object()
            .is_some_and(|map| map.contains_key("patterns") && map.contains_key("safety_class_rules"));

        if is_current {
            serde_json::from_value(value).map(PatternConfigSource::Current)
        } else {
            serde_json::from_value(value).map(PatternConfigSource::Legacy)
        }
    }

    /// Parse a pattern file from a JSON string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|source| ConfigError::Json {
            context: "pattern configuration".to_string(),
            source,
        })
    }

    /// Load a pattern file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Converts either schema into the canonical configuration
    pub fn normalize(self) -> CanonicalConfig {
        normalize(self)
    }
}

impl<'de> Deserialize<'de> for PatternConfigSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        PatternConfigSource::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// The single in-memory configuration used for evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalConfig {
    pub version: String,
    pub patterns: BTreeMap<String, Vec<PatternDefinition>>,
    pub safety_class_rules: BTreeMap<String, ClassRule>,
    pub severity_thresholds: BTreeMap<String, SeverityThreshold>,
    pub per_prompt_allowlist: BTreeMap<String, BTreeSet<String>>,
}

impl CanonicalConfig {
    /// Patterns of a group, or an empty slice if the group is not defined
    pub fn group(&self, name: &str) -> &[PatternDefinition] {
        self.patterns.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Blocking threshold for a safety class (`high` when unset)
    pub fn threshold_for(&self, safety_class: &str) -> SeverityThreshold {
        self.severity_thresholds
            .get(safety_class)
            .copied()
            .unwrap_or_default()
    }

    /// Allowlisted tokens for an entry, if any
    pub fn allowlist_for(&self, entry_id: &str) -> Option<&BTreeSet<String>> {
        self.per_prompt_allowlist.get(entry_id)
    }
}

/// Converts a pattern file of either schema into a [`CanonicalConfig`]
pub fn normalize(source: PatternConfigSource) -> CanonicalConfig {
    match source {
        PatternConfigSource::Current(current) => CanonicalConfig {
            version: version_or_default(current.version),
            patterns: current.patterns,
            safety_class_rules: current.safety_class_rules,
            severity_thresholds: current.overrides.severity_thresholds,
            per_prompt_allowlist: current.overrides.per_prompt_allowlist,
        },
        PatternConfigSource::Legacy(legacy) => convert_legacy(legacy),
    }
}

fn convert_legacy(mut legacy: LegacySchema) -> CanonicalConfig {
    let mut prohibited = Vec::new();
    for class in [READ_ONLY, ADVISORY] {
        if let Some(entry) = legacy.classes.remove(class) {
            prohibited.extend(entry.prohibited.into_iter().map(legacy_pattern));
        }
    }

    let mut patterns = BTreeMap::new();
    patterns.insert(PROHIBITED_GROUP.to_string(), prohibited);
    patterns.insert(INFORMATIONAL_GROUP.to_string(), Vec::new());

    let mut safety_class_rules = BTreeMap::new();
    let non_lab = ClassRule::new(&[PROHIBITED_GROUP, INFORMATIONAL_GROUP], true, false);
    safety_class_rules.insert(READ_ONLY.to_string(), non_lab.clone());
    safety_class_rules.insert(ADVISORY.to_string(), non_lab);
    safety_class_rules.insert(
        LAB_ONLY.to_string(),
        ClassRule::new(&[INFORMATIONAL_GROUP], false, false),
    );

    CanonicalConfig {
        version: version_or_default(legacy.version),
        patterns,
        safety_class_rules,
        severity_thresholds: legacy.overrides.severity_thresholds,
        per_prompt_allowlist: legacy.overrides.per_prompt_allowlist,
    }
}

fn legacy_pattern(record: LegacyPattern) -> PatternDefinition {
    let description = non_empty(record.description)
        .or_else(|| non_empty(record.id))
        .unwrap_or_else(|| "prohibited".to_string());

    PatternDefinition {
        pattern: record.pattern,
        description: Some(description),
        severity: Some(non_empty(record.severity).unwrap_or_else(|| "medium".to_string())),
        category: Some(non_empty(record.category).unwrap_or_else(|| "general".to_string())),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn version_or_default(version: Option<String>) -> String {
    non_empty(version).unwrap_or_else(|| DEFAULT_CONFIG_VERSION.to_string())
}
