// src/exec/store.rs

//! Artifact store: the latest value produced under each artifact name.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info};

use crate::task::{Artifact, Inputs, Task};

/// Mapping from artifact name to its most recently produced value.
///
/// Created fresh for every run, optionally seeded, and written only by the
/// executor. Names iterate in first-insertion order; overwriting a value keeps
/// the name's original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtifactStore {
    values: IndexMap<String, Value>,
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `artifacts`. Later duplicates win.
    pub fn seeded(artifacts: impl IntoIterator<Item = Artifact>) -> Self {
        let mut store = Self::new();
        store.merge(artifacts);
        store
    }

    /// Insert one artifact, returning the value it replaced.
    pub fn insert(&mut self, artifact: Artifact) -> Option<Value> {
        self.values.insert(artifact.name, artifact.value)
    }

    /// Insert every artifact, overwriting existing values.
    pub fn merge(&mut self, artifacts: impl IntoIterator<Item = Artifact>) {
        for artifact in artifacts {
            let name = artifact.name.clone();
            if self.insert(artifact).is_some() {
                debug!(artifact = %name, "artifact overwritten");
            }
        }
    }

    /// Build the input mapping for `task`. Names with no value map to `Null`.
    pub fn inputs_for(&self, task: &Task) -> Inputs {
        task.consumed()
            .map(|name| (name, self.values.get(name).cloned().unwrap_or(Value::Null)))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Log every name/value pair at `info`.
    pub fn log_artifacts(&self) {
        for (name, value) in self.values.iter() {
            info!(artifact = %name, %value, "artifact");
        }
    }

    /// The whole store as a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    pub fn into_artifacts(self) -> Vec<Artifact> {
        self.values
            .into_iter()
            .map(|(name, value)| Artifact { name, value })
            .collect()
    }
}
