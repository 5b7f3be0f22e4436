#![forbid(unsafe_code)]

//! Compiled content patterns
//!
//! A [`CompiledPattern`] wraps a [`PatternDefinition`] together with its
//! case-insensitive regex. Scanning a text yields every non-overlapping
//! match.

use crate::config::PatternDefinition;
use crate::error::RuleError;
use crate::types::Severity;
use regex::{Regex, RegexBuilder};

/// One match of a pattern inside a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch<'t> {
    /// Matched substring
    pub text: &'t str,
    /// Byte offset of the match start within the scanned text
    pub start: usize,
    /// Byte offset one past the match end
    pub end: usize,
}

/// A pattern definition compiled into an executable matcher
pub struct CompiledPattern {
    group: String,
    definition: PatternDefinition,
    severity: Severity,
    regex: Regex,
}

impl std::fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("group", &self.group)
            .field("pattern", &self.regex.as_str())
            .field("description", &self.definition.description)
            .field("severity", &self.severity)
            .finish()
    }
}

impl CompiledPattern {
    /// Compile a pattern definition belonging to `group`
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidPattern` if the pattern text is not a
    /// well-formed regular expression.
    pub fn compile(group: &str, definition: PatternDefinition) -> Result<Self, RuleError> {
        let regex = RegexBuilder::new(&definition.pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| RuleError::InvalidPattern {
                group: group.to_string(),
                pattern: definition.pattern.clone(),
                message: e.to_string(),
            })?;

        let severity = Severity::rank_or_high(definition.severity.as_deref());

        Ok(Self {
            group: group.to_string(),
            definition,
            severity,
            regex,
        })
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn definition(&self) -> &PatternDefinition {
        &self.definition
    }

    /// Ranked severity; absent or unknown labels rank as `High`
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Finds all non-overlapping matches in `text`
    pub fn find_matches<'t>(&self, text: &'t str) -> Vec<PatternMatch<'t>> {
        self.regex
            .find_iter(text)
            .map(|m| PatternMatch {
                text: m.as_str(),
                start: m.start(),
                end: m.end(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(pattern: &str, severity: Option<&str>) -> PatternDefinition {
        PatternDefinition {
            pattern: pattern.to_string(),
            description: Some("test pattern".to_string()),
            severity: severity.map(str::to_string),
            category: None,
        }
    }

    #[test]
    fn test_compile_valid_pattern() {
        let compiled = CompiledPattern::compile("informational", def(r"calc\.exe", Some("low")));
        let compiled = compiled.unwrap();
        assert_eq!(compiled.group(), "informational");
        assert_eq!(compiled.severity(), Severity::Low);
        assert_eq!(compiled.definition().pattern, r"calc\.exe");
    }

    #[test]
    fn test_compile_invalid_pattern() {
        let result = CompiledPattern::compile("prohibited_for_non_lab", def("[unclosed", None));
        match result {
            Err(RuleError::InvalidPattern { group, pattern, .. }) => {
                assert_eq!(group, "prohibited_for_non_lab");
                assert_eq!(pattern, "[unclosed");
            }
            other => panic!("expected InvalidPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_lookaround_and_backreferences_rejected() {
        for pattern in [r"calc(?=\.exe)", r"(?<!safe )rm -rf", r"(\w+) \1"] {
            let result = CompiledPattern::compile("prohibited_for_non_lab", def(pattern, None));
            assert!(
                matches!(result, Err(RuleError::InvalidPattern { .. })),
                "{} should not compile",
                pattern
            );
        }
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let compiled = CompiledPattern::compile("g", def("mimikatz", None)).unwrap();
        let matches = compiled.find_matches("Mimikatz and MIMIKATZ and mimikatz");
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].text, "Mimikatz");
        assert_eq!(matches[1].text, "MIMIKATZ");
    }

    #[test]
    fn test_matches_are_non_overlapping() {
        let compiled = CompiledPattern::compile("g", def("aa", None)).unwrap();
        let matches = compiled.find_matches("aaaaa");
        assert_eq!(matches.len(), 2);
        assert_eq!((matches[0].start, matches[0].end), (0, 2));
        assert_eq!((matches[1].start, matches[1].end), (2, 4));
    }

    #[test]
    fn test_no_match() {
        let compiled = CompiledPattern::compile("g", def(r"calc\.exe", None)).unwrap();
        assert!(compiled.find_matches("calcXexe").is_empty());
    }

    #[test]
    fn test_missing_severity_ranks_high() {
        let compiled = CompiledPattern::compile("g", def("x", None)).unwrap();
        assert_eq!(compiled.severity(), Severity::High);
        let compiled = CompiledPattern::compile("g", def("x", Some("Critical"))).unwrap();
        assert_eq!(compiled.severity(), Severity::High);
    }
}
