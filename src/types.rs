#![forbid(unsafe_code)]

//! Core domain types for guardrail-evals

use serde::{Deserialize, Serialize};
use std::fmt;

/// Group name holding patterns that are prohibited outside lab-only prompts
pub const PROHIBITED_GROUP: &str = "prohibited_for_non_lab";

/// Group name holding informational patterns
pub const INFORMATIONAL_GROUP: &str = "informational";

/// Safety class names known to the built-in rule tables
pub const READ_ONLY: &str = "read-only";
pub const ADVISORY: &str = "advisory";
pub const LAB_ONLY: &str = "lab-only";

/// Pattern severity, ordered `Low < Medium < High`
///
/// Severity labels in pattern files are free text. A missing or unrecognized
/// label ranks as `High` so that a typo can only make a pattern stricter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Parses a severity label, ignoring case
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            _ => None,
        }
    }

    /// Ranks an optional label, treating absent or unknown labels as `High`
    pub fn rank_or_high(label: Option<&str>) -> Self {
        label.and_then(Severity::parse).unwrap_or(Severity::High)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum severity a prohibited match needs before it blocks
///
/// Configured per safety class as a severity label or the literal `"off"`,
/// which makes blocking unreachable for that class. Unknown labels fall back
/// to `high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SeverityThreshold {
    AtLeast(Severity),
    Off,
}

impl SeverityThreshold {
    /// Returns true if a match of `severity` reaches this threshold
    pub fn blocks(&self, severity: Severity) -> bool {
        match self {
            SeverityThreshold::AtLeast(min) => severity >= *min,
            SeverityThreshold::Off => false,
        }
    }
}

impl Default for SeverityThreshold {
    fn default() -> Self {
        SeverityThreshold::AtLeast(Severity::High)
    }
}

/// Threshold labels are matched exactly. Any other spelling, including
/// `"OFF"` or `"Medium"`, falls back to `high`.
impl From<String> for SeverityThreshold {
    fn from(value: String) -> Self {
        match value.as_str() {
            "off" => SeverityThreshold::Off,
            "low" => SeverityThreshold::AtLeast(Severity::Low),
            "medium" => SeverityThreshold::AtLeast(Severity::Medium),
            _ => SeverityThreshold::AtLeast(Severity::High),
        }
    }
}

impl From<SeverityThreshold> for String {
    fn from(threshold: SeverityThreshold) -> Self {
        threshold.to_string()
    }
}

impl fmt::Display for SeverityThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeverityThreshold::AtLeast(severity) => write!(f, "{}", severity),
            SeverityThreshold::Off => f.write_str("off"),
        }
    }
}

/// A normalized section anchor token
///
/// Catalog anchors are written as `#token`; the stored form has the leading
/// `#` stripped and is lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Anchor(String);

impl Anchor {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref().trim();
        let token = raw.strip_prefix('#').unwrap_or(raw);
        Anchor(token.to_lowercase())
    }

    /// Returns the bare token without the leading `#`
    pub fn token(&self) -> &str {
        &self.0
    }

    /// Returns the inline marker text, e.g. `{#token}`
    pub fn marker(&self) -> String {
        format!("{{#{}}}", self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
