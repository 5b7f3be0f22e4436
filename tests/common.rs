//! Test utilities for guardrail-evals integration tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Document holding a single prohibited command
pub const SCENARIO_DOCUMENT: &str = "# Prompts\n\n## Foo {#foo}\nrun calc.exe now\n";

/// Catalog with a single read-only entry pointing at `#foo`
pub const SCENARIO_CATALOG: &str = r##"{
  "prompts": [
    { "id": "p1", "title": "Foo", "anchor": "#foo", "safety_class": "read-only" }
  ]
}"##;

/// Current-schema configuration with `read-only` blocking at `medium`
pub fn scenario_patterns(allowlist: &str) -> String {
    format!(
        r#"{{
  "version": "1.2.0",
  "patterns": {{
    "prohibited_for_non_lab": [
      {{ "pattern": "calc\\.exe", "severity": "high", "description": "exec", "category": "execution" }}
    ],
    "informational": []
  }},
  "safety_class_rules": {{
    "read-only": {{ "check_patterns": ["prohibited_for_non_lab", "informational"], "fail_on_prohibited": true }},
    "advisory": {{ "check_patterns": ["prohibited_for_non_lab", "informational"], "fail_on_prohibited": true }},
    "lab-only": {{ "check_patterns": ["informational"] }}
  }},
  "severity_thresholds": {{ "read-only": "medium" }},
  "per_prompt_allowlist": {}
}}"#,
        allowlist
    )
}

/// Lay out a project using the default locations
///
/// `Prompts/Tem-Prompts.md`, `Prompts/index.json` and
/// `guardrails/patterns.json` under `root`.
pub fn write_project(root: &Path, document: &str, catalog: &str, patterns: &str) {
    let prompts = root.join("Prompts");
    fs::create_dir_all(&prompts).unwrap();
    fs::write(prompts.join("Tem-Prompts.md"), document).unwrap();
    fs::write(prompts.join("index.json"), catalog).unwrap();

    let guardrails = root.join("guardrails");
    fs::create_dir_all(&guardrails).unwrap();
    fs::write(guardrails.join("patterns.json"), patterns).unwrap();
}

/// Read and parse a JSON artifact
pub fn read_json(path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("{} missing: {}", path.display(), e));
    serde_json::from_str(&content).expect("artifact is not valid JSON")
}
