// src/task/artifact.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;

/// A named value passed from a producing task to its consumers.
///
/// Values are JSON-shaped so they can hold anything a task needs while still
/// supporting typed, fail-fast access through [`crate::task::Inputs::get_as`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub name: String,
    pub value: Value,
}

impl Artifact {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Build an artifact from any serializable value.
    pub fn from_serialize<T: Serialize>(name: impl Into<String>, value: &T) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            value: serde_json::to_value(value)?,
        })
    }

    /// Parse `NAME=VALUE`. The value is read as JSON when it parses, and as
    /// a plain string otherwise.
    pub fn parse_assignment(s: &str) -> std::result::Result<Self, String> {
        let (name, raw) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("artifact name is empty in '{s}'"));
        }
        Ok(Self::new(name, parse_loose_value(raw)))
    }
}

/// JSON if it parses, otherwise the raw text as a string.
pub(crate) fn parse_loose_value(raw: &str) -> Value {
    serde_json::from_str(raw.trim()).unwrap_or_else(|_| Value::String(raw.to_string()))
}
