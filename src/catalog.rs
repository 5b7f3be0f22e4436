#![forbid(unsafe_code)]

//! Prompt catalog loading
//!
//! The catalog is a JSON file listing every prompt entry, either as
//! `{ "prompts": [...] }` or as a bare array. Entries are decoded one by
//! one so a parse error names the offending entry. A missing `id` or
//! `safety_class` is not a parse error; such entries surface later as
//! `unknown_safety_class` warnings.

use crate::error::ConfigError;
use crate::types::Anchor;
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// One cataloged prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: String,

    /// Section anchor, conventionally written `#token`
    #[serde(default)]
    pub anchor: String,

    #[serde(default)]
    pub safety_class: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_roe_token: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_level: Option<String>,
}

impl CatalogEntry {
    /// Creates an entry with only the fields evaluation needs
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        anchor: impl Into<String>,
        safety_class: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            anchor: anchor.into(),
            safety_class: safety_class.into(),
            requires_roe_token: None,
            risk_level: None,
            authorization_level: None,
        }
    }

    pub fn anchor(&self) -> Anchor {
        Anchor::new(&self.anchor)
    }
}

/// The full ordered list of catalog entries
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Parse a catalog from a JSON string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(s).map_err(|source| ConfigError::Json {
            context: "catalog".to_string(),
            source,
        })?;

        let items = match value {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("prompts") {
                Some(Value::Array(items)) => items,
                _ => return Err(shape_error("expected a `prompts` array")),
            },
            _ => return Err(shape_error("expected an object or an array of entries")),
        };

        let entries = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item).map_err(|source| ConfigError::Json {
                    context: format!("catalog entry {}", index),
                    source,
                })
            })
            .collect::<Result<Vec<CatalogEntry>, _>>()?;

        Ok(Self { entries })
    }

    /// Load a catalog from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }
}

fn shape_error(message: &str) -> ConfigError {
    ConfigError::Json {
        context: "catalog".to_string(),
        source: serde_json::Error::custom(message),
    }
}

/// Read the prompt document
pub fn load_document(path: impl AsRef<Path>) -> Result<String, ConfigError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}
