// src/task/inputs.rs

//! The consumed-artifact mapping handed to an action.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{Result, TaskdagError};

static NULL: Value = Value::Null;

/// Name → value mapping for the artifacts a task consumes.
///
/// Every consumed name is present. An artifact that no task has produced yet
/// (and that was not seeded) shows up as `Value::Null`; the scheduler does not
/// check producibility, so actions that care should use [`Inputs::require`]
/// or [`Inputs::get_as`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inputs {
    values: IndexMap<String, Value>,
}

impl Inputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Raw value for `name`, or `Null` when absent.
    pub fn get(&self, name: &str) -> &Value {
        self.values.get(name).unwrap_or(&NULL)
    }

    /// Convenience for string-valued artifacts.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).as_str()
    }

    /// Value for `name`, failing if it is absent or `Null`.
    pub fn require(&self, name: &str) -> Result<&Value> {
        match self.values.get(name) {
            Some(Value::Null) | None => Err(TaskdagError::MissingArtifact(name.to_string())),
            Some(value) => Ok(value),
        }
    }

    /// Deserialize `name` into `T`.
    ///
    /// A producer/consumer type mismatch surfaces here as
    /// `TaskdagError::ArtifactType` instead of flowing on silently.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let value = self.require(name)?;
        T::deserialize(value).map_err(|source| TaskdagError::ArtifactType {
            name: name.to_string(),
            expected: std::any::type_name::<T>(),
            source,
        })
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
}

impl<K: Into<String>> FromIterator<(K, Value)> for Inputs {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
